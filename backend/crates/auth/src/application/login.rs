//! Login Use Case
//!
//! Verifies credentials and opens a new session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session::SessionUseCase;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    sessions: SessionUseCase<S>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions: SessionUseCase::new(session_repo, config),
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<User> {
        let user = self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password_valid = user
            .password_hash
            .verify(ClearTextPassword::new(input.password))
            .await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.sessions.open(&user.id).await?;

        tracing::info!(
            user_id = %user.id,
            session_id = %session.id,
            "User logged in"
        );

        Ok(user)
    }
}
