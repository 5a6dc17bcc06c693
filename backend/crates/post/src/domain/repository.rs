//! Post repository trait
//!
//! Posts are stored as whole documents with their votes and comments
//! embedded; each operation below is atomic for a single post.

use kernel::id::{CommentId, UserId};

use crate::domain::entity::{NewComment, NewPost, Post, Vote};
use crate::domain::value_object::{Category, PostId};
use crate::error::PostResult;

#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Inserts and assigns the id.
    async fn create(&self, post: NewPost) -> PostResult<Post>;

    /// Increments `views` and returns the post after the increment.
    async fn get_by_id(&self, id: &PostId) -> PostResult<Post>;

    /// Highest score first.
    async fn list_all(&self) -> PostResult<Vec<Post>>;

    async fn list_by_author(&self, username: &str) -> PostResult<Vec<Post>>;

    async fn list_by_category(&self, category: Category) -> PostResult<Vec<Post>>;

    async fn delete(&self, id: &PostId) -> PostResult<()>;

    /// Assigns the comment id and appends it.
    async fn add_comment(&self, id: &PostId, comment: NewComment) -> PostResult<Post>;

    /// Unknown comment ids leave the post unchanged.
    async fn remove_comment(&self, id: &PostId, comment_id: &CommentId) -> PostResult<Post>;

    /// Replaces the voter's previous vote or appends a new one.
    async fn add_vote(&self, id: &PostId, vote: Vote) -> PostResult<Post>;

    async fn cancel_vote(&self, id: &PostId, user: &UserId) -> PostResult<Post>;
}
