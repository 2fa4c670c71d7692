use super::templates;
use crate::api;
use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

#[derive(Debug, Display, Error)]
pub enum UserError {
    UrlNotFound,
    Unauthorized,
    FormInputValueError(#[error(not(source))] String),
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        if let UserError::Unauthorized = self {
            return web::HttpResponse::Found()
                .header("location", "/login")
                .finish();
        }

        let mut context = tera::Context::new();
        error!("{:#?}", self);

        let template_name = match self {
            UserError::FormInputValueError(msg) => {
                context.insert("msg_details", &format!("formulário com valores inválidos: {msg}"));
                "errors/invalid_input_values.html"
            }
            _ => {
                context.insert("msg_details", "recurso não encontrado");
                "errors/url_not_found.html"
            }
        };

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render(template_name, &context)
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound => http::StatusCode::NOT_FOUND,
            UserError::Unauthorized => http::StatusCode::FOUND,
            UserError::FormInputValueError(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    TemplateError(#[error(not(source))] String),
    InternalServerError(#[error(not(source))] String),
    InvalidCsrfToken,
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::TemplateError(msg) => format!("[TemplateError] {:#?}", msg),
            ServerError::InternalServerError(msg) => format!("[InternalServerError] {:#?}", msg),
            ServerError::InvalidCsrfToken => "[InvalidCsrfToken]".to_string(),
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        error!("{}", self.get_error_message());

        web::HttpResponse::build(self.status_code())
            .set_header("content-type", "text/html; charset=utf-8")
            .body(
                templates::WEB_TEMPLATES
                    .render("errors/internal_error.html", &tera::Context::new())
                    .unwrap_or(self.to_string()),
            )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ServerError::InvalidCsrfToken => http::StatusCode::FORBIDDEN,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Maps the errors the handlers don't turn into a notice
pub fn api_error(err: api::ApiError) -> web::Error {
    match err {
        api::ApiError::NotFound => UserError::UrlNotFound.into(),
        api::ApiError::Validation(msg) | api::ApiError::Conflict(msg) => {
            UserError::FormInputValueError(msg).into()
        }
        api::ApiError::Repo(e) => ServerError::InternalServerError(e.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::{error::WebResponseError, test};

    #[test]
    fn test_unauthorized_redirects_to_login() {
        let req = test::TestRequest::default().to_http_request();

        let resp = UserError::Unauthorized.error_response(&req);

        assert_eq!(resp.status(), http::StatusCode::FOUND);
        assert_eq!(
            resp.headers()
                .get(http::header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }
}
