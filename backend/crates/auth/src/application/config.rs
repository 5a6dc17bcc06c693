//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared behind an `Arc`; nothing re-reads the environment per request.

use std::fmt;
use std::time::Duration;

use platform::password::{DEFAULT_COST, MIN_COST};

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (`exp - iat`)
    pub token_ttl: Duration,
    /// Session lifetime (`expires_at - created_at`)
    pub session_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(3600),
            session_ttl: Duration::from_secs(3600),
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Random secret and the cheapest bcrypt cost (for development and tests)
    pub fn development() -> Self {
        Self {
            bcrypt_cost: MIN_COST,
            ..Self::new(platform::crypto::random_bytes(32))
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("session_ttl", &self.session_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}
