//! Test app pieces to drive the handlers with a mocked repository.

use csrf::AesGcmCsrfProtection;
use ntex::{
    Pipeline, Service,
    http::{Request, header},
    web::{self, test},
};
use ntex_identity::{CookieIdentityPolicy, Identity, IdentityService};
use ntex_session::CookieSession;

use crate::{
    front::{AppState, middleware::csrf_token::CsrfToken, session},
    repo,
};

pub const SIGN_IN_PATH: &str = "/sign-in";

/// Tutor logged by [sign_in]
pub const TUTOR_ID: i64 = 1;

pub fn app_state(mock_repo: repo::MockAppRepo) -> AppState {
    AppState {
        csrf_protec: AesGcmCsrfProtection::from_key([5; 32]),
        repo: Box::new(mock_repo),
    }
}

pub fn session_middleware() -> CookieSession {
    CookieSession::private(&[6; 32]).secure(false)
}

pub fn identity_middleware() -> IdentityService<CookieIdentityPolicy> {
    IdentityService::new(
        CookieIdentityPolicy::new(&[7; 32])
            .name("user_id")
            .secure(false),
    )
}

/// Logs [TUTOR_ID] in and answers with the form token of its session
pub async fn sign_in(
    identity: Identity,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<web::HttpResponse, web::Error> {
    let token = CsrfToken::store_new_pair(&app_state.csrf_protec, &cookie)?;
    identity.remember(serde_json::to_string(&session::WebAppSession {
        user_id: TUTOR_ID,
        username: "ana".into(),
    })?);

    Ok(web::HttpResponse::Ok().body(token))
}

/// `Cookie` header value with every cookie set by `response`
pub fn cookies_of(response: &web::WebResponse) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Signs in through [SIGN_IN_PATH], returns the session cookies and the
/// form token
pub async fn signed_in<S, E>(app: &Pipeline<S>) -> (String, String)
where
    S: Service<Request, Response = web::WebResponse, Error = E>,
    E: std::fmt::Debug,
{
    let response =
        test::call_service(app, test::TestRequest::with_uri(SIGN_IN_PATH).to_request()).await;
    let cookies = cookies_of(&response);
    let token = String::from_utf8(test::read_body(response).await.to_vec()).unwrap();

    (cookies, token)
}

pub fn location_of(response: &web::WebResponse) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
