//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Author, Comment, Post, PostKind, Vote};
use crate::domain::value_object::Category;

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /posts`. Unknown `type` or `category` fails decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of `POST /post/{post_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into_inner(),
            username: author.username,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub user: String,
    pub vote: i64,
}

impl From<Vote> for VoteResponse {
    fn from(vote: Vote) -> Self {
        Self {
            vote: vote.value.delta(),
            user: vote.user.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub created: DateTime<Utc>,
    pub author: AuthorResponse,
    pub body: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            created: comment.created,
            author: comment.author.into(),
            body: comment.body,
        }
    }
}

/// Post on the wire. `comments` is always an array, never null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub score: i64,
    pub views: u64,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub title: String,
    pub author: AuthorResponse,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub votes: Vec<VoteResponse>,
    pub comments: Vec<CommentResponse>,
    pub created: DateTime<Utc>,
    pub upvote_percentage: u8,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            score: post.score,
            views: post.views,
            kind: post.content.kind(),
            text: post.content.text().map(str::to_owned),
            url: post.content.url().map(str::to_owned),
            title: post.title,
            author: post.author.into(),
            category: post.category,
            votes: post.votes.into_iter().map(VoteResponse::from).collect(),
            comments: post.comments.into_iter().map(CommentResponse::from).collect(),
            created: post.created,
            upvote_percentage: post.upvote_percentage,
        }
    }
}

pub fn post_list(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use kernel::id::UserId;

    use super::*;
    use crate::domain::entity::{NewPost, PostContent};
    use crate::domain::value_object::PostId;

    #[test]
    fn wire_shape() {
        let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let post = NewPost::new(
            "Hi",
            Category::Music,
            PostContent::Text("hello".into()),
            Author {
                id: UserId::from_raw("aaaaaaaaaaaaaaaaaaaaaaaa"),
                username: "alice".into(),
            },
            created,
        )
        .with_id(PostId::parse("65a1f0c2b3d4e5f60718293a").unwrap());

        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "65a1f0c2b3d4e5f60718293a",
                "score": 1,
                "views": 0,
                "type": "text",
                "title": "Hi",
                "author": {"id": "aaaaaaaaaaaaaaaaaaaaaaaa", "username": "alice"},
                "category": "music",
                "text": "hello",
                "votes": [{"user": "aaaaaaaaaaaaaaaaaaaaaaaa", "vote": 1}],
                "comments": [],
                "created": "2023-11-14T22:13:20Z",
                "upvotePercentage": 100,
            })
        );
    }

    #[test]
    fn create_request_rejects_unknown_category() {
        let ok: CreatePostRequest = serde_json::from_str(
            r#"{"type":"link","title":"t","category":"news","url":"https://x"}"#,
        )
        .unwrap();
        assert_eq!(ok.kind, PostKind::Link);
        assert!(ok.text.is_none());

        assert!(
            serde_json::from_str::<CreatePostRequest>(
                r#"{"type":"text","title":"t","category":"sports","text":"x"}"#
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<CreatePostRequest>(
                r#"{"type":"image","title":"t","category":"news"}"#
            )
            .is_err()
        );
    }
}
