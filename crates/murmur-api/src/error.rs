//! Error type shared by the services and the HTTP handlers.
//!
//! Every variant maps to exactly one status code; handlers propagate with `?`
//! and the conversion to a response happens once, in `IntoResponse`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input, empty fields, or text outside the allowed length.
    #[error("{0}")]
    Validation(String),

    /// Registration rejected by account rules (e.g. short password).
    #[error("{0}")]
    Registration(String),

    #[error("{0} already exists")]
    DuplicateUsername(String),

    #[error("The messageId {0} cannot be found")]
    MessageNotFound(i64),

    /// Login did not match any account. Rendered without a body.
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Registration(_) | Self::MessageNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateUsername(_) => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Unauthorized => status.into_response(),
            Self::Internal(e) => {
                error!("Internal error: {:#}", e);
                (status, "Internal server error").into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
