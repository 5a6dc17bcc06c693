//! Authenticated identity
//!
//! [`AuthUser`] is what the auth middleware attaches to a request after the
//! bearer token and session have been verified. Handlers of identified routes
//! take it as an extractor.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// `{id, username}` of the caller, as carried in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
}

impl AuthUser {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

#[cfg(feature = "axum")]
mod extract {
    use axum::extract::FromRequestParts;
    use http::request::Parts;

    use super::AuthUser;
    use crate::error::app_error::AppError;

    /// Reads the identity from request extensions.
    ///
    /// A route reached without the middleware having run gets a 401 rather
    /// than an anonymous caller.
    impl<S> FromRequestParts<S> for AuthUser
    where
        S: Send + Sync,
    {
        type Rejection = AppError;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            parts
                .extensions
                .get::<AuthUser>()
                .filter(|user| !user.id.as_str().is_empty())
                .cloned()
                .ok_or_else(|| AppError::unauthorized("unauthorized"))
        }
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use axum::extract::FromRequestParts;
    use http::Request;

    use super::*;

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let (mut parts, _) = Request::new(()).into_parts();
        let err = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), "unauthorized");
    }

    #[tokio::test]
    async fn identity_is_read_from_extensions() {
        let user = AuthUser::new(UserId::from_raw("abcdefghijklmnopqrstuvwx"), "alice");
        let (mut parts, _) = Request::new(()).into_parts();
        parts.extensions.insert(user.clone());
        let got = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(got, user);
    }
}
