//! Application error type with HTTP response conversion.
//!
//! Every recoverable failure in the API is represented as an [`AppError`]
//! carrying the HTTP status to answer with, the operation-level message shown
//! in the response envelope, and the underlying cause. Errors are converted
//! into the structured fail envelope at the request boundary.
//!
//! Not-found, conflict, and invalid-page conditions all answer with 400
//! rather than more specific statuses. That is the API contract inherited
//! from the previous versions of this service and clients depend on it.

use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ApiResponse;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub source: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            message: message.into(),
            source: err.into(),
        }
    }

    /// Malformed or missing request fields.
    pub fn validation<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, message, err)
    }

    /// Missing, invalid, or expired credentials.
    pub fn authentication<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, message, err)
    }

    /// Valid credentials, insufficient role.
    pub fn authorization<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, message, err)
    }

    /// Requested record does not exist. Answers 400, not 404.
    pub fn not_found<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, message, err)
    }

    /// Uniqueness violation, e.g. a duplicate email.
    pub fn conflict<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, message, err)
    }

    /// Requested page is outside the computed page range.
    pub fn invalid_page<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, message, err)
    }

    pub fn internal<E>(message: impl Into<String>, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to process request",
            err,
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.source, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, error = %self.source, "{}", self.message);
        }

        ApiResponse::fail(self.message, self.source.to_string(), self.status).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::database(err)
    }
}
