//! In-memory Repository Implementations
//!
//! Backs unit and HTTP tests; state lives behind `tokio::sync::RwLock`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    sessions: Arc<RwLock<Vec<Session>>>,
    fail_session_writes: Arc<AtomicBool>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent session insert fail.
    pub fn fail_session_writes(&self, fail: bool) {
        self.fail_session_writes.store(fail, Ordering::SeqCst);
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AuthError::UserAlreadyExists);
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        if self.fail_session_writes.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("session store unavailable".to_string()));
        }
        self.sessions.write().await.push(session.clone());
        Ok(())
    }

    async fn is_valid(&self, user_id: &UserId) -> AuthResult<bool> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .any(|s| s.user_id == *user_id && s.is_live_at(now)))
    }

    async fn invalidate(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.user_id != *user_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|s| s.is_live_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
