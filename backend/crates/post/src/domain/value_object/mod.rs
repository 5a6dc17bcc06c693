pub mod category;
pub mod post_id;
pub mod vote_action;

pub use category::Category;
pub use post_id::PostId;
pub use vote_action::VoteAction;
