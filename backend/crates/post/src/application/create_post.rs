//! Create Post Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::identity::AuthUser;

use crate::domain::entity::{NewPost, Post, PostContent, PostKind};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::Category;
use crate::error::PostResult;

pub struct CreatePostInput {
    pub kind: PostKind,
    pub title: String,
    pub category: Category,
    pub text: Option<String>,
    pub url: Option<String>,
}

pub struct CreatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validates the content and stores a fresh post carrying the
    /// author's upvote.
    pub async fn execute(&self, input: CreatePostInput, author: AuthUser) -> PostResult<Post> {
        let content = PostContent::from_parts(input.kind, input.text, input.url)?;
        let draft = NewPost::new(input.title, input.category, content, author.into(), Utc::now());

        let post = self.repo.create(draft).await?;

        tracing::info!(
            post_id = %post.id,
            author = %post.author.username,
            category = %post.category,
            "Post created"
        );

        Ok(post)
    }
}
