//! Post Error Types
//!
//! Post-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::{AppError, BodyKey};
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Post-specific result type alias
pub type PostResult<T> = Result<T, PostError>;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,

    /// Not 24 hex characters
    #[error("invalid ID format")]
    InvalidId,

    #[error("vote not found")]
    VoteNotFound,

    #[error("invalid action")]
    InvalidAction,

    /// Voter identity is missing
    #[error("missing username")]
    MissingUser,

    #[error("post already exists")]
    AlreadyExists,

    /// Type/text/url combination rejected
    #[error("{0}")]
    InvalidContent(&'static str),

    /// Optimistic vote update lost every retry
    #[error("concurrent vote conflict")]
    Conflict,

    #[error("storage error: {0}")]
    Storage(#[from] mongodb::error::Error),

    #[error("document encoding failed: {0}")]
    Encoding(#[from] mongodb::bson::ser::Error),

    #[error("internal error: {0}")]
    Internal(String),

    /// Request rejected before reaching a use case (content type, body)
    #[error(transparent)]
    Request(#[from] AppError),
}

impl PostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::NotFound | PostError::VoteNotFound => ErrorKind::NotFound,
            PostError::InvalidId
            | PostError::InvalidAction
            | PostError::MissingUser
            | PostError::AlreadyExists
            | PostError::InvalidContent(_) => ErrorKind::BadRequest,
            PostError::Conflict => ErrorKind::Conflict,
            PostError::Storage(_) | PostError::Encoding(_) | PostError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            PostError::Request(err) => err.kind(),
        }
    }

    /// Client errors carry the reason under `"error"`; server errors are
    /// plain text without internals.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        match self {
            PostError::Request(err) => err,
            PostError::Storage(_) => AppError::new(kind, "storage error").with_source(self),
            PostError::Encoding(_) | PostError::Internal(_) => {
                AppError::new(kind, "internal error").with_source(self)
            }
            _ => AppError::new(kind, self.to_string()).with_body_key(BodyKey::Error),
        }
    }

    pub fn log(&self) {
        match self {
            PostError::Storage(e) => {
                tracing::error!(error = %e, "Post storage error");
            }
            PostError::Encoding(e) => {
                tracing::error!(error = %e, "Post document encoding failed");
            }
            PostError::Internal(msg) => {
                tracing::error!(message = %msg, "Post internal error");
            }
            PostError::Conflict => {
                tracing::warn!("Vote update gave up after repeated conflicts");
            }
            _ => {
                tracing::debug!(error = %self, "Post error");
            }
        }
    }
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        err.into_app_error()
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_use_error_key() {
        let err = PostError::NotFound.into_app_error();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "post not found");
        assert_eq!(err.body_key(), BodyKey::Error);

        let err = PostError::InvalidAction.into_app_error();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "invalid action");

        let err = PostError::VoteNotFound.into_app_error();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "vote not found");
    }

    #[test]
    fn conflict_is_409() {
        let err = PostError::Conflict.into_app_error();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.message(), "concurrent vote conflict");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = PostError::Internal("lock poisoned".into()).into_app_error();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.body_key(), BodyKey::Text);
        assert_eq!(err.message(), "internal error");
    }
}
