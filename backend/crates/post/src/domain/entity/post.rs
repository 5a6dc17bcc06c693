//! Post Aggregate
//!
//! A post owns its votes and comments. Every mutation goes through the
//! methods here so the score and upvote percentage always agree with the
//! vote list.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, UserId};
use kernel::identity::AuthUser;
use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::vote::{Vote, VoteValue};
use crate::domain::value_object::{Category, PostId};
use crate::error::{PostError, PostResult};

/// Author snapshot taken at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: UserId,
    pub username: String,
}

impl From<AuthUser> for Author {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Text,
    Link,
}

impl PostKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PostKind::Text => "text",
            PostKind::Link => "link",
        }
    }
}

/// Exactly one of text or url, matching the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    Text(String),
    Link(String),
}

impl PostContent {
    /// Validates a client-supplied combination.
    pub fn from_parts(kind: PostKind, text: Option<String>, url: Option<String>) -> PostResult<Self> {
        match (kind, text, url) {
            (PostKind::Text, Some(text), None) => Ok(PostContent::Text(text)),
            (PostKind::Text, None, _) => Err(PostError::InvalidContent("text post requires text")),
            (PostKind::Text, Some(_), Some(_)) => {
                Err(PostError::InvalidContent("text post cannot have url"))
            }
            (PostKind::Link, None, Some(url)) => Ok(PostContent::Link(url)),
            (PostKind::Link, _, None) => Err(PostError::InvalidContent("link post requires url")),
            (PostKind::Link, Some(_), Some(_)) => {
                Err(PostError::InvalidContent("link post cannot have text"))
            }
        }
    }

    /// Lenient rebuild from storage; a missing field reads as empty.
    pub fn from_stored(kind: PostKind, text: Option<String>, url: Option<String>) -> Self {
        match kind {
            PostKind::Text => PostContent::Text(text.unwrap_or_default()),
            PostKind::Link => PostContent::Link(url.unwrap_or_default()),
        }
    }

    pub fn kind(&self) -> PostKind {
        match self {
            PostContent::Text(_) => PostKind::Text,
            PostContent::Link(_) => PostKind::Link,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            PostContent::Text(text) => Some(text),
            PostContent::Link(_) => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            PostContent::Link(url) => Some(url),
            PostContent::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub category: Category,
    pub content: PostContent,
    pub author: Author,
    pub score: i64,
    pub views: u64,
    pub upvote_percentage: u8,
    pub votes: Vec<Vote>,
    pub comments: Vec<Comment>,
    pub created: DateTime<Utc>,
}

impl Post {
    /// Replaces the user's vote if present, otherwise appends it.
    pub fn cast_vote(&mut self, user: &UserId, value: VoteValue) {
        match self.votes.iter_mut().find(|v| v.user == *user) {
            Some(existing) => {
                self.score += value.delta() - existing.value.delta();
                existing.value = value;
            }
            None => {
                self.score += value.delta();
                self.votes.push(Vote::new(user.clone(), value));
            }
        }
        self.refresh_upvote_percentage();
    }

    pub fn cancel_vote(&mut self, user: &UserId) -> PostResult<()> {
        let index = self
            .votes
            .iter()
            .position(|v| v.user == *user)
            .ok_or(PostError::VoteNotFound)?;
        let removed = self.votes.remove(index);
        self.score -= removed.value.delta();
        self.refresh_upvote_percentage();
        Ok(())
    }

    pub fn remove_comment(&mut self, comment_id: &CommentId) {
        self.comments.retain(|c| c.id != *comment_id);
    }

    fn refresh_upvote_percentage(&mut self) {
        self.upvote_percentage = upvote_percentage(&self.votes);
    }
}

/// `floor(100 * ups / total)`, or 0 without votes.
pub fn upvote_percentage(votes: &[Vote]) -> u8 {
    if votes.is_empty() {
        return 0;
    }
    let ups = votes.iter().filter(|v| v.value == VoteValue::Up).count();
    // ups <= len, so the quotient is at most 100
    u8::try_from(ups * 100 / votes.len()).unwrap_or(100)
}

/// Post before the repository assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub category: Category,
    pub content: PostContent,
    pub author: Author,
    pub score: i64,
    pub views: u64,
    pub upvote_percentage: u8,
    pub votes: Vec<Vote>,
    pub comments: Vec<Comment>,
    pub created: DateTime<Utc>,
}

impl NewPost {
    /// Fresh post: the author's own upvote, no views, no comments.
    pub fn new(
        title: impl Into<String>,
        category: Category,
        content: PostContent,
        author: Author,
        created: DateTime<Utc>,
    ) -> Self {
        let votes = vec![Vote::new(author.id.clone(), VoteValue::Up)];
        Self {
            title: title.into(),
            category,
            content,
            score: 1,
            views: 0,
            upvote_percentage: upvote_percentage(&votes),
            votes,
            comments: Vec::new(),
            author,
            created,
        }
    }

    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            category: self.category,
            content: self.content,
            author: self.author,
            score: self.score,
            views: self.views,
            upvote_percentage: self.upvote_percentage,
            votes: self.votes,
            comments: self.comments,
            created: self.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: &str, name: &str) -> Author {
        Author {
            id: UserId::from_raw(id),
            username: name.to_string(),
        }
    }

    fn post() -> Post {
        NewPost::new(
            "Hi",
            Category::Music,
            PostContent::Text("hello".into()),
            author("aaaaaaaaaaaaaaaaaaaaaaaa", "alice"),
            Utc::now(),
        )
        .with_id(PostId::parse("65a1f0c2b3d4e5f60718293a").unwrap())
    }

    fn assert_consistent(post: &Post) {
        let sum: i64 = post.votes.iter().map(|v| v.value.delta()).sum();
        assert_eq!(post.score, sum);
        assert_eq!(post.upvote_percentage, upvote_percentage(&post.votes));
        let mut users: Vec<_> = post.votes.iter().map(|v| v.user.as_str()).collect();
        users.sort_unstable();
        users.dedup();
        assert_eq!(users.len(), post.votes.len());
    }

    #[test]
    fn new_post_starts_with_author_upvote() {
        let post = post();
        assert_eq!(post.score, 1);
        assert_eq!(post.views, 0);
        assert_eq!(post.upvote_percentage, 100);
        assert_eq!(post.votes, vec![Vote::new(post.author.id.clone(), VoteValue::Up)]);
        assert!(post.comments.is_empty());
    }

    #[test]
    fn repeated_upvote_is_idempotent() {
        let mut post = post();
        let bob = UserId::from_raw("bbbbbbbbbbbbbbbbbbbbbbbb");
        post.cast_vote(&bob, VoteValue::Up);
        let once = post.clone();
        post.cast_vote(&bob, VoteValue::Up);
        assert_eq!(post, once);
        assert_eq!(post.score, 2);
        assert_consistent(&post);
    }

    #[test]
    fn switching_vote_replaces_it() {
        let mut post = post();
        let bob = UserId::from_raw("bbbbbbbbbbbbbbbbbbbbbbbb");

        post.cast_vote(&bob, VoteValue::Down);
        assert_eq!(post.score, 0);
        assert_eq!(post.upvote_percentage, 50);

        post.cast_vote(&bob, VoteValue::Up);
        assert_eq!(post.score, 2);
        assert_eq!(post.upvote_percentage, 100);
        assert_eq!(post.votes.len(), 2);
        assert_consistent(&post);
    }

    #[test]
    fn unvote_restores_previous_state() {
        let mut post = post();
        let before = post.clone();
        let bob = UserId::from_raw("bbbbbbbbbbbbbbbbbbbbbbbb");

        post.cast_vote(&bob, VoteValue::Up);
        post.cancel_vote(&bob).unwrap();
        assert_eq!(post, before);

        assert!(matches!(post.cancel_vote(&bob), Err(PostError::VoteNotFound)));
    }

    #[test]
    fn cancelling_last_vote_zeroes_percentage() {
        let mut post = post();
        let alice = post.author.id.clone();
        post.cancel_vote(&alice).unwrap();
        assert_eq!(post.score, 0);
        assert_eq!(post.upvote_percentage, 0);
        assert!(post.votes.is_empty());
    }

    #[test]
    fn percentage_truncates() {
        let mut post = post();
        post.cast_vote(&UserId::from_raw("bbbbbbbbbbbbbbbbbbbbbbbb"), VoteValue::Down);
        post.cast_vote(&UserId::from_raw("cccccccccccccccccccccccc"), VoteValue::Down);
        // 1 of 3
        assert_eq!(post.upvote_percentage, 33);
        assert_eq!(post.score, -1);
        assert_consistent(&post);
    }

    #[test]
    fn content_combinations() {
        assert_eq!(
            PostContent::from_parts(PostKind::Link, None, Some("https://x".into())).unwrap(),
            PostContent::Link("https://x".into())
        );
        assert!(matches!(
            PostContent::from_parts(PostKind::Text, None, None),
            Err(PostError::InvalidContent("text post requires text"))
        ));
        assert!(matches!(
            PostContent::from_parts(PostKind::Text, Some("t".into()), Some("u".into())),
            Err(PostError::InvalidContent("text post cannot have url"))
        ));
        assert!(matches!(
            PostContent::from_parts(PostKind::Link, Some("t".into()), None),
            Err(PostError::InvalidContent("link post requires url"))
        ));
        assert!(matches!(
            PostContent::from_parts(PostKind::Link, Some("t".into()), Some("u".into())),
            Err(PostError::InvalidContent("link post cannot have text"))
        ));
    }
}
