//! Vote Use Case
//!
//! Maps `upvote` / `downvote` / `unvote` onto the repository.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{Post, Vote, VoteValue};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{PostId, VoteAction};
use crate::error::{PostError, PostResult};

pub struct VoteUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> VoteUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, post_id: &str, user: &UserId, action: &str) -> PostResult<Post> {
        if user.as_str().is_empty() {
            return Err(PostError::MissingUser);
        }
        let action: VoteAction = action.parse()?;
        let id = PostId::parse(post_id)?;

        let post = match action {
            VoteAction::Upvote => {
                self.repo
                    .add_vote(&id, Vote::new(user.clone(), VoteValue::Up))
                    .await?
            }
            VoteAction::Downvote => {
                self.repo
                    .add_vote(&id, Vote::new(user.clone(), VoteValue::Down))
                    .await?
            }
            VoteAction::Unvote => self.repo.cancel_vote(&id, user).await?,
        };

        tracing::debug!(
            post_id = %id,
            user_id = %user,
            action = action.as_str(),
            score = post.score,
            "Vote applied"
        );
        Ok(post)
    }
}
