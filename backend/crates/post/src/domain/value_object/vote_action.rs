//! Vote Action
//!
//! Path segment of `GET /post/{post_id}/{action}`.

use std::str::FromStr;

use crate::error::PostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Upvote,
    Downvote,
    Unvote,
}

impl VoteAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VoteAction::Upvote => "upvote",
            VoteAction::Downvote => "downvote",
            VoteAction::Unvote => "unvote",
        }
    }
}

impl FromStr for VoteAction {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteAction::Upvote),
            "downvote" => Ok(VoteAction::Downvote),
            "unvote" => Ok(VoteAction::Unvote),
            _ => Err(PostError::InvalidAction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_actions() {
        assert_eq!("upvote".parse::<VoteAction>().unwrap(), VoteAction::Upvote);
        assert_eq!("downvote".parse::<VoteAction>().unwrap(), VoteAction::Downvote);
        assert_eq!("unvote".parse::<VoteAction>().unwrap(), VoteAction::Unvote);
        assert!(matches!("UPVOTE".parse::<VoteAction>(), Err(PostError::InvalidAction)));
        assert!(matches!("like".parse::<VoteAction>(), Err(PostError::InvalidAction)));
    }
}
