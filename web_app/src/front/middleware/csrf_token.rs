use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use csrf::CsrfProtection;
use ntex::{http::Payload, web};
use ntex_session::UserSession;
use serde::Deserialize;

use crate::{
    consts,
    front::{AppState, errors, session::SessionStore},
};

/// Token pair of the tutor session.
///
/// The cookie half never leaves the session, the token half is rendered in
/// every form and must come back in the `csrf_token` query value.
#[derive(Default, serde::Serialize, serde::Deserialize)]
pub struct CsrfToken {
    pub token_base64: String,
    pub cookie_base64: String,
}

#[derive(Deserialize)]
struct SubmittedToken {
    csrf_token: String,
}

impl CsrfToken {
    /// Generates a new token pair, stores it in the session and returns the
    /// token half for the forms
    pub fn store_new_pair(
        csrf_protec: &impl CsrfProtection,
        store: &impl SessionStore,
    ) -> Result<String, web::Error> {
        let (csrf_token, csrf_cookie) = csrf_protec
            .generate_token_pair(None, consts::MAX_AGE_COOKIES)
            .map_err(|e| {
                errors::ServerError::InternalServerError(format!(
                    "cant set token csrf protection: {e}"
                ))
            })?;

        let pair = CsrfToken {
            token_base64: BASE64_URL_SAFE_NO_PAD.encode(csrf_token.value()),
            cookie_base64: BASE64_URL_SAFE_NO_PAD.encode(csrf_cookie.value()),
        };

        store
            .set_value(consts::CSRF_TOKEN_COOKIE_NAME, serde_json::to_string(&pair)?)
            .map_err(|e| errors::ServerError::InternalServerError(e.to_string()))?;

        Ok(pair.token_base64)
    }

    /// Pair stored in the session, if the tutor has one
    pub fn from_session(store: &impl SessionStore) -> Option<Self> {
        store
            .get_value::<String>(consts::CSRF_TOKEN_COOKIE_NAME)
            .ok()
            .flatten()
            .and_then(|csrf| serde_json::from_str::<CsrfToken>(&csrf).ok())
    }

    /// Token half rendered as `csrf_token` in the forms, empty without a pair
    pub fn form_token(store: &impl SessionStore) -> String {
        Self::from_session(store)
            .map(|pair| pair.token_base64)
            .unwrap_or_default()
    }

    /// Checks a submitted token against the cookie half of this pair
    fn verifies(&self, csrf_protec: &impl CsrfProtection, submitted_token: &str) -> bool {
        let token = BASE64_URL_SAFE_NO_PAD
            .decode(submitted_token.as_bytes())
            .map(|token| csrf_protec.parse_token(&token));
        let cookie = BASE64_URL_SAFE_NO_PAD
            .decode(self.cookie_base64.as_bytes())
            .map(|cookie| csrf_protec.parse_cookie(&cookie));

        if let (Ok(Ok(token)), Ok(Ok(cookie))) = (token, cookie) {
            return csrf_protec.verify_token_pair(&token, &cookie).is_ok();
        }

        false
    }
}

fn is_csrf_valid(req: &web::HttpRequest) -> bool {
    let submitted =
        web::types::Query::<SubmittedToken>::from_query(req.query_string()).map(|q| q.0);

    if let (Ok(submitted), Some(stored), Some(app_state)) = (
        submitted,
        CsrfToken::from_session(&req.get_session()),
        req.app_state::<AppState>(),
    ) {
        return stored.verifies(&app_state.csrf_protec, &submitted.csrf_token);
    }

    false
}

impl<Err> web::FromRequest<Err> for CsrfToken {
    type Error = web::Error;

    fn from_request(
        req: &web::HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        if !is_csrf_valid(req) {
            log::warn!("rejected {} {}: invalid csrf token", req.method(), req.path());
            return std::future::ready(Err(errors::ServerError::InvalidCsrfToken.into()));
        }

        std::future::ready(Ok(Self::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::front::session::tests::MemoryStore;
    use csrf::AesGcmCsrfProtection;

    #[test]
    fn test_stored_pair_verifies_only_its_token() {
        let csrf_protec = AesGcmCsrfProtection::from_key([3; 32]);
        let store = MemoryStore::default();

        let token = CsrfToken::store_new_pair(&csrf_protec, &store).unwrap();
        let stored = CsrfToken::from_session(&store).unwrap();

        assert_eq!(CsrfToken::form_token(&store), token);
        assert!(stored.verifies(&csrf_protec, &token));
        assert!(!stored.verifies(&csrf_protec, ""));
        assert!(!stored.verifies(&csrf_protec, "bm90LWEtdG9rZW4"));

        let other_store = MemoryStore::default();
        let other_token = CsrfToken::store_new_pair(&csrf_protec, &other_store).unwrap();
        assert!(!stored.verifies(&csrf_protec, &other_token));
    }

    #[test]
    fn test_form_token_without_pair() {
        assert_eq!(CsrfToken::form_token(&MemoryStore::default()), "");
    }
}
