//! Comment Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::CommentId;
use kernel::identity::AuthUser;

use crate::domain::entity::{NewComment, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::PostId;
use crate::error::PostResult;

pub struct CommentUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> CommentUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Stamps the comment with now and the caller as author.
    pub async fn add(&self, post_id: &str, author: AuthUser, body: String) -> PostResult<Post> {
        let id = PostId::parse(post_id)?;
        let comment = NewComment::new(author.into(), body, Utc::now());
        let post = self.repo.add_comment(&id, comment).await?;
        tracing::debug!(post_id = %id, comments = post.comments.len(), "Comment added");
        Ok(post)
    }

    /// Removing an unknown comment returns the post unchanged.
    pub async fn remove(&self, post_id: &str, comment_id: &CommentId) -> PostResult<Post> {
        let id = PostId::parse(post_id)?;
        self.repo.remove_comment(&id, comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use kernel::id::UserId;

    use super::*;
    use crate::application::create_post::{CreatePostInput, CreatePostUseCase};
    use crate::domain::entity::PostKind;
    use crate::domain::value_object::Category;
    use crate::error::PostError;
    use crate::infra::memory::InMemoryPostRepository;

    fn user(name: &str) -> AuthUser {
        AuthUser::new(UserId::from_raw(format!("{name:a>24}")), name)
    }

    #[tokio::test]
    async fn add_then_remove_restores_post() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let post = CreatePostUseCase::new(repo.clone())
            .execute(
                CreatePostInput {
                    kind: PostKind::Link,
                    title: "Rust".into(),
                    category: Category::Programming,
                    text: None,
                    url: Some("https://www.rust-lang.org".into()),
                },
                user("alice"),
            )
            .await
            .unwrap();

        let comments = CommentUseCase::new(repo);
        let commented = comments
            .add(post.id.as_str(), user("bob"), "nice".into())
            .await
            .unwrap();
        let comment = &commented.comments[0];
        assert_eq!(comment.body, "nice");
        assert_eq!(comment.author.username, "bob");
        assert_eq!(comment.id.as_str().len(), 24);

        let restored = comments
            .remove(post.id.as_str(), &comment.id)
            .await
            .unwrap();
        assert_eq!(restored, post);
    }

    #[tokio::test]
    async fn missing_post() {
        let comments = CommentUseCase::new(Arc::new(InMemoryPostRepository::new()));
        let err = comments
            .add("ffffffffffffffffffffffff", user("bob"), "hi".into())
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::NotFound));
    }
}
