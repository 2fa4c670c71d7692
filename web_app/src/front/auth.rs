use ntex::web;
use ntex_identity::Identity;
use serde_json::json;

use crate::{
    api,
    front::{
        AppState, errors, forms, middleware,
        session::{self, NoticeLevel},
        utils,
    },
    models,
};

/// Stores the csrf token pair and the logged tutor in the cookies
fn start_session(
    user: &models::user_app::User,
    app_state: &AppState,
    cookie: &ntex_session::Session,
    identity: &Identity,
) -> Result<(), web::Error> {
    middleware::csrf_token::CsrfToken::store_new_pair(&app_state.csrf_protec, cookie)?;
    identity.remember(serde_json::to_string(&session::WebAppSession::from(user))?);

    log::info!("user {} logged in", user.id);
    Ok(())
}

#[web::get("/login")]
async fn get_login_view(
    middleware::logged_user::MaybeLoggedUser(logged_user): middleware::logged_user::MaybeLoggedUser,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    if logged_user.is_some() {
        return utils::redirect_to("/pets/");
    }

    utils::render_page(
        "auth/login.html",
        &cookie,
        None,
        json!({ "username": "" }),
    )
}

#[web::post("/login")]
async fn login(
    form: web::types::Form<forms::user::LoginForm>,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    match api::user::authenticate(&form, &app_state.repo).await {
        Ok(user) => {
            start_session(&user, &app_state, &cookie, &identity)?;
            utils::redirect_with_notice(
                &cookie,
                "/pets/",
                NoticeLevel::Success,
                format!("Bem-vindo, {}!", user.username),
            )
        }
        Err(api::ApiError::Validation(msg)) => {
            session::push_notice(&cookie, NoticeLevel::Error, msg);
            utils::render_page(
                "auth/login.html",
                &cookie,
                None,
                json!({ "username": form.username.trim() }),
            )
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/register")]
async fn get_register_view(
    middleware::logged_user::MaybeLoggedUser(logged_user): middleware::logged_user::MaybeLoggedUser,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    if logged_user.is_some() {
        return utils::redirect_to("/pets/");
    }

    utils::render_page(
        "auth/register.html",
        &cookie,
        None,
        json!({ "username": "" }),
    )
}

#[web::post("/register")]
async fn register(
    form: web::types::Form<forms::user::RegisterForm>,
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    match api::user::register(&form, &app_state.repo).await {
        Ok(user) => {
            start_session(&user, &app_state, &cookie, &identity)?;
            utils::redirect_with_notice(
                &cookie,
                "/pets/",
                NoticeLevel::Success,
                "Conta criada com sucesso!",
            )
        }
        Err(api::ApiError::Validation(msg) | api::ApiError::Conflict(msg)) => {
            session::push_notice(&cookie, NoticeLevel::Error, msg);
            utils::render_page(
                "auth/register.html",
                &cookie,
                None,
                json!({ "username": form.username.trim() }),
            )
        }
        Err(e) => Err(errors::api_error(e)),
    }
}

#[web::get("/logout")]
async fn get_logout_view(
    logged_user: session::WebAppSession,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    utils::render_page("auth/logout.html", &cookie, Some(&logged_user), json!({}))
}

#[web::post("/logout")]
async fn logout(
    logged_user: session::WebAppSession,
    _: middleware::csrf_token::CsrfToken,
    cookie: ntex_session::Session,
    identity: Identity,
) -> Result<impl web::Responder, web::Error> {
    identity.forget();
    cookie.clear();

    log::info!("user {} logged out", logged_user.user_id);
    utils::redirect_with_notice(
        &cookie,
        "/login",
        NoticeLevel::Info,
        "Você saiu da sua conta.",
    )
}
