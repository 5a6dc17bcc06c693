//! User Entity
//!
//! Identity record: opaque id, unique username and the stored password hash.

use kernel::id::{ID_LEN, UserId};
use kernel::identity::AuthUser;
use platform::crypto::random_alphanumeric;
use platform::password::HashedPassword;

/// User entity
///
/// Immutable after creation. The hash is never serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    /// 24 characters from `[0-9A-Za-z]`
    pub id: UserId,
    pub username: String,
    pub password_hash: HashedPassword,
}

impl User {
    /// Create a new user with a fresh random id
    pub fn new(username: impl Into<String>, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::from_raw(random_alphanumeric(ID_LEN)),
            username: username.into(),
            password_hash,
        }
    }

    /// Identity carried in tokens and request extensions
    pub fn identity(&self) -> AuthUser {
        AuthUser::new(self.id.clone(), self.username.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_alphanumeric_id() {
        let user = User::new("alice", HashedPassword::from_stored("$2b$04$x"));
        assert_eq!(user.id.as_str().len(), ID_LEN);
        assert!(user.id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(user.identity().username, "alice");
    }
}
