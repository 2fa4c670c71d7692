//! # API Module
//!
//! Business rules of the app, independent of the web framework. Every
//! function receives the logged tutor id and the repository, validates the
//! input and only touches records that tutor owns.

pub mod access;
pub mod event;
pub mod goal;
pub mod pet;
pub mod shop;
pub mod shopping;
pub mod user;

use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// The record does not exist or belongs to another tutor
    #[display("resource not found")]
    NotFound,
    /// Input that the user can fix and submit again
    #[display("{_0}")]
    Validation(#[error(not(source))] String),
    /// A business rule refused the action
    #[display("{_0}")]
    Conflict(#[error(not(source))] String),
    #[display("repository error: {_0}")]
    Repo(#[error(not(source))] anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Repo(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Result of a one-way state transition
#[derive(Debug, PartialEq)]
pub enum Completion<T> {
    Done(T),
    /// The record was already in its final state, nothing was written
    AlreadyDone(T),
}

/// Date format used by `<input type="date">`
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Trims a submitted value, the text is stored as typed and escaped by the
/// templates when rendered
pub(crate) fn clean_field(value: &str) -> String {
    value.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_field_keeps_text_as_typed() {
        assert_eq!(clean_field("  Tom & Jerry "), "Tom & Jerry");
        assert_eq!(clean_field("Rex <3"), "Rex <3");
        assert_eq!(clean_field("Dose 1 & 2\n"), "Dose 1 & 2");
    }

    #[test]
    fn test_stored_text_is_escaped_once_when_rendered() {
        let mut context = tera::Context::new();
        context.insert("name", &clean_field("Tom & Jerry"));

        let rendered = tera::Tera::one_off("<h1>{{ name }}</h1>", &context, true).unwrap();

        assert_eq!(rendered, "<h1>Tom &amp; Jerry</h1>");
    }
}
