use ntex::{
    http::Payload,
    web::{Error, FromRequest, HttpRequest},
};
use ntex_identity::RequestIdentity;

use crate::front::{errors, session};

fn deserialize_logged_user(str: &str) -> serde_json::Result<session::WebAppSession> {
    serde_json::from_str::<session::WebAppSession>(str)
}

/// Extracts the [session::WebAppSession] from the identity cookie
fn get_logged_user(auth_cookie: Option<String>) -> Result<session::WebAppSession, Error> {
    if let Ok(user) = deserialize_logged_user(&auth_cookie.unwrap_or_default()) {
        return Ok(user);
    }

    Err(errors::UserError::Unauthorized.into())
}

impl<Err> FromRequest<Err> for session::WebAppSession {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let identity_cookie = req.get_identity();
        futures::future::ready(get_logged_user(identity_cookie))
    }
}

/// Logged tutor if there is one, pages like the login form work both ways
pub struct MaybeLoggedUser(pub Option<session::WebAppSession>);

impl<Err> FromRequest<Err> for MaybeLoggedUser {
    type Error = Error;

    fn from_request(
        req: &HttpRequest,
        _: &mut Payload,
    ) -> impl std::future::Future<Output = Result<Self, Self::Error>> {
        let identity_cookie = req.get_identity();

        futures::future::ready(Ok(Self(get_logged_user(identity_cookie).ok())))
    }
}
