use super::{errors, middleware::csrf_token::CsrfToken, session, templates};
use crate::config;
use ntex::web;

/// [ntext responder](ntex::web::HttpResponse) to redirect to `url`
pub fn redirect_to(url: &str) -> Result<web::HttpResponse, web::Error> {
    Ok(web::HttpResponse::Found().header("location", url).finish())
}

/// Queues a notice and redirects to `url`
pub fn redirect_with_notice(
    store: &impl session::SessionStore,
    url: &str,
    level: session::NoticeLevel,
    text: impl Into<String>,
) -> Result<web::HttpResponse, web::Error> {
    session::push_notice(store, level, text);
    redirect_to(url)
}

/// Renders a full page, draining the queued notices into it. Forms get
/// the session `csrf_token`.
///
/// `template` also names the page in the error log when rendering fails.
pub fn render_page(
    template: &str,
    store: &impl session::SessionStore,
    logged_user: Option<&session::WebAppSession>,
    values: serde_json::Value,
) -> Result<web::HttpResponse, web::Error> {
    let mut context = tera::Context::from_value(values).unwrap_or_default();
    context.insert("notices", &session::take_notices(store));
    context.insert("csrf_token", &CsrfToken::form_token(store));
    context.insert("shop_enabled", &config::APP_CONFIG.shop_enabled);
    if let Some(user) = logged_user {
        context.insert("logged_user", user);
    }

    let content = templates::WEB_TEMPLATES
        .render(template, &context)
        .map_err(|e| {
            errors::ServerError::TemplateError(format!(
                "template {template} couldnt be rendered: {e}"
            ))
        })?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}
