//! Post Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post aggregate, value objects, repository trait
//! - `application/` - Create, query, comment, vote and delete use cases
//! - `infra/` - MongoDB and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Aggregate Rules
//! - `score` is the sum of all votes, one vote per user
//! - `upvotePercentage` is the truncated share of upvotes, 0 without votes
//! - A new post starts with its author's upvote and no comments
//! - Fetching a single post counts one view

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{PostError, PostResult};
pub use infra::memory::InMemoryPostRepository;
pub use infra::mongo::MongoPostRepository;
pub use presentation::{PostAppState, post_routes};
