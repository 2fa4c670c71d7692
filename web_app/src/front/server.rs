//! Handlers not linked to a specific resource

use ntex::web;

use crate::front::{errors, utils};

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}

/// The pets list is the home of the app
#[web::get("/")]
async fn index() -> Result<impl web::Responder, web::Error> {
    utils::redirect_to("/pets/")
}
