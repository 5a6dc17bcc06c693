//! Session Entity
//!
//! Server-side proof of a live login. Any unexpired session of a user
//! authorizes that user's identified requests.

use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::{ID_LEN, SessionId, UserId};
use platform::crypto::random_alphanumeric;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session at `now` that lives for `ttl`.
    pub fn open(user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            id: SessionId::from_raw(random_alphanumeric(ID_LEN)),
            user_id,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// `expires_at > now`
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
