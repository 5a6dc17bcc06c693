//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::CommentId;

use super::post::Author;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub created: DateTime<Utc>,
    pub author: Author,
    pub body: String,
}

/// Comment before the repository assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub created: DateTime<Utc>,
    pub author: Author,
    pub body: String,
}

impl NewComment {
    pub fn new(author: Author, body: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            created,
            author,
            body: body.into(),
        }
    }

    pub fn with_id(self, id: CommentId) -> Comment {
        Comment {
            id,
            created: self.created,
            author: self.author,
            body: self.body,
        }
    }
}
