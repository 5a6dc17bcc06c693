pub mod comment;
pub mod create_post;
pub mod delete_post;
pub mod query;
pub mod vote;

pub use comment::CommentUseCase;
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use query::PostQueryUseCase;
pub use vote::VoteUseCase;
