//! Auth Middleware
//!
//! Guards identified routes: bearer token, token verification, live session,
//! then the caller's [`AuthUser`] is attached to the request.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use kernel::identity::AuthUser;
use platform::bearer::bearer_token;

use crate::application::SessionUseCase;
use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenCodec>,
}

/// Middleware that requires a verified token and a live session.
///
/// Every failure answers 401 `{"message":"unauthorized"}`.
pub async fn require_identity<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    match authenticate(&state, req.headers()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

async fn authenticate<R>(state: &AuthMiddlewareState<R>, headers: &HeaderMap) -> AuthResult<AuthUser>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(headers).ok_or(AuthError::InvalidToken)?;
    let claims = state.tokens.verify(token)?;

    let sessions = SessionUseCase::new(state.repo.clone(), state.config.clone());
    if !sessions.is_valid(&claims.user.id).await {
        return Err(AuthError::SessionInvalid);
    }

    Ok(claims.user)
}

/// Wraps the identified routes of a router in [`require_identity`].
pub fn identity_guard<R>(state: AuthMiddlewareState<R>) -> impl FnOnce(Router) -> Router
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    move |router| router.route_layer(from_fn_with_state(state, require_identity::<R>))
}
