//! Post Queries
//!
//! Single-post fetch counts a view. Listings never fail: storage errors
//! are logged and read as an empty list.

use std::sync::Arc;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{Category, PostId};
use crate::error::{PostError, PostResult};

pub struct PostQueryUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> PostQueryUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, post_id: &str) -> PostResult<Post> {
        let id = PostId::parse(post_id)?;
        self.repo.get_by_id(&id).await
    }

    pub async fn list_all(&self) -> Vec<Post> {
        or_empty(self.repo.list_all().await, "all")
    }

    pub async fn list_by_author(&self, username: &str) -> Vec<Post> {
        or_empty(self.repo.list_by_author(username).await, "author")
    }

    /// Unknown categories list nothing.
    pub async fn list_by_category(&self, category: &str) -> Vec<Post> {
        let Ok(category) = category.parse::<Category>() else {
            tracing::debug!(category, "Unknown category requested");
            return Vec::new();
        };
        or_empty(self.repo.list_by_category(category).await, "category")
    }
}

fn or_empty(result: PostResult<Vec<Post>>, listing: &'static str) -> Vec<Post> {
    result.unwrap_or_else(|err: PostError| {
        tracing::error!(error = %err, listing, "Post listing failed");
        Vec::new()
    })
}
