//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use kernel::identity::AuthUser;
use kernel::json::{decode, require_json_content_type};

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, SessionUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CredentialsRequest, FieldErrorsResponse, MessageResponse, TokenResponse,
};
use crate::presentation::middleware::AuthMiddlewareState;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenCodec>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenCodec::new(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }

    /// State for the identity guard, sharing the same store and keys.
    pub fn middleware_state(&self) -> AuthMiddlewareState<R> {
        AuthMiddlewareState {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let req = decode_credentials(&headers, &body)?;
    let username = req.username.clone();

    let use_case = RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let input = RegisterInput {
        username: req.username,
        password: req.password,
    };

    match use_case.execute(input).await {
        Ok(user) => issue_token(&state.tokens, &user),
        Err(AuthError::UserAlreadyExists) => {
            tracing::debug!(username = %username, "Username already taken");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(FieldErrorsResponse::username_taken(username)),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<Response>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let req = decode_credentials(&headers, &body)?;

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    issue_token(&state.tokens, &user)
}

// ============================================================================
// Logout (requires authentication)
// ============================================================================

/// POST /api/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthUser,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    SessionUseCase::new(state.repo.clone(), state.config.clone())
        .invalidate(&user.id)
        .await?;

    Ok(Json(MessageResponse { message: "success" }))
}

// ============================================================================
// Helpers
// ============================================================================

fn decode_credentials(headers: &HeaderMap, body: &[u8]) -> AuthResult<CredentialsRequest> {
    require_json_content_type(headers)?;
    Ok(decode(body, "bad json")?)
}

fn issue_token(tokens: &TokenCodec, user: &User) -> AuthResult<Response> {
    let token = tokens.mint(user.identity())?;
    Ok(Json(TokenResponse { token }).into_response())
}
