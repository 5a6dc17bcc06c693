use std::sync::Arc;

use kernel::identity::AuthUser;

use crate::domain::repository::PostRepository;
use crate::domain::value_object::PostId;
use crate::error::PostResult;

/// Removes a post with its votes and comments. Any identified user may
/// delete any post.
pub struct DeletePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: &str, caller: &AuthUser) -> PostResult<()> {
        let id = PostId::parse(post_id)?;
        self.repo.delete(&id).await?;
        tracing::info!(post_id = %id, user_id = %caller.id, "Post deleted");
        Ok(())
    }
}
