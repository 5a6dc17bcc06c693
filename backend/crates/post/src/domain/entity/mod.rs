pub mod comment;
pub mod post;
pub mod vote;

pub use comment::{Comment, NewComment};
pub use post::{Author, NewPost, Post, PostContent, PostKind};
pub use vote::{Vote, VoteValue};
