//! Vote Entity

use kernel::id::UserId;

/// Direction of a vote; contributes `+1` or `-1` to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    pub const fn delta(&self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }

    /// Stored form; anything non-positive reads back as a downvote.
    pub const fn from_delta(value: i64) -> Self {
        if value > 0 { VoteValue::Up } else { VoteValue::Down }
    }
}

/// At most one per user per post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub user: UserId,
    pub value: VoteValue,
}

impl Vote {
    pub fn new(user: UserId, value: VoteValue) -> Self {
        Self { user, value }
    }
}
