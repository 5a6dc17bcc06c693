//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::app_error::{AppError, BodyKey};
use kernel::error::kind::ErrorKind;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    UserAlreadyExists,

    #[error("user not found")]
    UserNotFound,

    /// Wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username and password are required")]
    MissingCredentials,

    /// Signature, algorithm, expiry or payload check failed
    #[error("invalid token")]
    InvalidToken,

    /// No unexpired session for the token's user
    #[error("no active session")]
    SessionInvalid,

    #[error("failed to create session")]
    SessionCreation(#[source] Box<AuthError>),

    #[error("password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),

    #[error("token signing failed: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),

    /// Request rejected before reaching a use case (content type, body)
    #[error(transparent)]
    Request(#[from] AppError),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists => ErrorKind::UnprocessableEntity,
            AuthError::UserNotFound
            | AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::MissingCredentials => ErrorKind::BadRequest,
            AuthError::SessionCreation(_)
            | AuthError::Hashing(_)
            | AuthError::TokenSigning(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::Request(err) => err.kind(),
        }
    }

    /// Convert to AppError with the body the endpoint contract expects.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        match self {
            AuthError::Request(err) => err,
            AuthError::InvalidCredentials => AppError::new(kind, "invalid password"),
            AuthError::InvalidToken | AuthError::SessionInvalid => {
                AppError::new(kind, "unauthorized")
            }
            AuthError::MissingCredentials => {
                AppError::new(kind, self.to_string()).with_body_key(BodyKey::Error)
            }
            AuthError::Database(_) => AppError::new(kind, "database error").with_source(self),
            AuthError::Hashing(_) => AppError::new(kind, "password hashing failed").with_source(self),
            AuthError::TokenSigning(_) => AppError::new(kind, "token signing failed").with_source(self),
            _ => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::SessionCreation(cause) => {
                tracing::error!(error = %cause, "Session creation failed");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::TokenSigning(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.into_app_error()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
