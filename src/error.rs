use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::BookStatus;

/// Top-level error for store and service operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A field failed a validation rule. Always recoverable; the variant names
/// the offending field.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("year {0} is out of range (expected 0..={1})")]
    YearOutOfRange(i32, i32),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("email already registered: {0}")]
    EmailTaken(String),
}

/// A referenced record does not exist.
#[derive(Error, Debug, PartialEq)]
pub enum NotFound {
    #[error("book {0} not found")]
    Book(i64),

    #[error("reader {0} not found")]
    Reader(i64),

    #[error("issue {0} not found")]
    Issue(i64),

    #[error("no active issue for book {0}")]
    ActiveIssue(i64),
}

/// A loan state-machine precondition was violated.
#[derive(Error, Debug, PartialEq)]
pub enum InvalidTransition {
    #[error("book {0} is not available for issue (status: {1})")]
    BookNotAvailable(i64, BookStatus),

    #[error("book {0} has an open issue")]
    BookOnLoan(i64),

    #[error("reader {0} has an open issue")]
    ReaderOnLoan(i64),
}

impl Error {
    /// HTTP status the API layer reports this error with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(ValidationError::EmailTaken(_)) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidTransition(_) => StatusCode::CONFLICT,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            // Internal detail stays in the log, not the response body.
            Error::Database(e) => {
                tracing::error!("database error: {}", e);
                "database error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
