//! Session Use Case
//!
//! Opens, checks and invalidates server-side sessions.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

pub struct SessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// New session for `user_id`. Storage failures surface as
    /// `AuthError::SessionCreation`.
    pub async fn open(&self, user_id: &UserId) -> AuthResult<Session> {
        let session = Session::open(user_id.clone(), Utc::now(), self.config.session_ttl);
        self.session_repo
            .create_session(&session)
            .await
            .map_err(|e| AuthError::SessionCreation(Box::new(e)))?;

        tracing::debug!(user_id = %user_id, session_id = %session.id, "Session opened");
        Ok(session)
    }

    /// Store errors count as "no session".
    pub async fn is_valid(&self, user_id: &UserId) -> bool {
        match self.session_repo.is_valid(user_id).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!(error = %e, user_id = %user_id, "Session lookup failed");
                false
            }
        }
    }

    /// Drop every session of the user.
    pub async fn invalidate(&self, user_id: &UserId) -> AuthResult<u64> {
        let removed = self.session_repo.invalidate(user_id).await?;
        tracing::info!(user_id = %user_id, sessions_removed = removed, "Sessions invalidated");
        Ok(removed)
    }
}
