//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{session::Session, user::User};
use crate::error::AuthResult;

/// Identity store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; a taken username is `AuthError::UserAlreadyExists`.
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;
}

/// Session store
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()>;

    /// True iff the user has at least one session with `expires_at > now`.
    async fn is_valid(&self, user_id: &UserId) -> AuthResult<bool>;

    /// Delete every session of the user
    async fn invalidate(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
