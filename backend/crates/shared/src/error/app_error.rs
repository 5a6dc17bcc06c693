//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct, the [`BodyKey`] selecting the response body
//! shape, and the [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Shape of the response body an error is rendered into.
///
/// The public API mixes three conventions, so every error carries the one
/// its endpoint expects:
///
/// | Key       | Body                         |
/// |-----------|------------------------------|
/// | `Message` | `{"message": "<text>"}`      |
/// | `Error`   | `{"error": "<text>"}`        |
/// | `Text`    | `<text>` as `text/plain`     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKey {
    Message,
    Error,
    Text,
}

impl BodyKey {
    /// Default shape for a kind: 5xx render as plain text, the rest as `message`.
    #[inline]
    pub const fn default_for(kind: ErrorKind) -> Self {
        if kind.is_server_error() {
            BodyKey::Text
        } else {
            BodyKey::Message
        }
    }

    /// JSON field name, `None` for plain text.
    #[inline]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            BodyKey::Message => Some("message"),
            BodyKey::Error => Some("error"),
            BodyKey::Text => None,
        }
    }
}

/// Unified application error
///
/// Built with a kind and a client-visible message, optionally refined with
/// [`with_body_key`](Self::with_body_key) and [`with_source`](Self::with_source).
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::{AppError, BodyKey};
/// use kernel::error::kind::ErrorKind;
///
/// let err = AppError::new(ErrorKind::NotFound, "post not found");
/// assert_eq!(err.body_key(), BodyKey::Message);
///
/// let err = AppError::bad_request("bad json").with_body_key(BodyKey::Error);
/// assert_eq!(err.body_key(), BodyKey::Error);
/// ```
pub struct AppError {
    kind: ErrorKind,
    /// Client-visible text; never contains internal details.
    message: Cow<'static, str>,
    key: BodyKey,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            key: BodyKey::default_for(kind),
            source: None,
        }
    }

    /// 400 Bad Request
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 401 Unauthorized
    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// 404 Not Found
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 409 Conflict
    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Override the response body shape.
    #[inline]
    pub fn with_body_key(mut self, key: BodyKey) -> Self {
        self.key = key;
        self
    }

    /// Attach the underlying error. It is kept for logs and never rendered.
    ///
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn read_config() -> AppResult<String> {
    ///     std::fs::read_to_string("config.json")
    ///         .map_err(|e| AppError::internal("failed to read config").with_source(e))
    /// }
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn body_key(&self) -> BodyKey {
        self.key
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        builder.field("key", &self.key);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "post not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "post not found");
        assert_eq!(err.body_key(), BodyKey::Message);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::bad_request("test").status_code(), 400);
        assert_eq!(AppError::unauthorized("test").status_code(), 401);
        assert_eq!(AppError::not_found("test").status_code(), 404);
        assert_eq!(AppError::conflict("test").status_code(), 409);
        assert_eq!(AppError::internal("test").status_code(), 500);
    }

    #[test]
    fn test_default_body_key() {
        assert_eq!(AppError::bad_request("x").body_key(), BodyKey::Message);
        assert_eq!(AppError::internal("x").body_key(), BodyKey::Text);
        assert_eq!(
            AppError::not_found("x")
                .with_body_key(BodyKey::Error)
                .body_key(),
            BodyKey::Error
        );
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::internal("failed to read file").with_source(io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("post not found");
        assert_eq!(err.to_string(), "[Not Found] post not found");
    }
}
