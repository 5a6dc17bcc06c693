//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases, token codec, configuration
//! - `infra/` - MySQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, identity guard
//!
//! ## Features
//! - Register / login with username + password, returning a bearer token
//! - Server-side sessions; any unexpired session authorizes the user
//! - Logout drops every session of the caller
//!
//! ## Security Model
//! - Passwords hashed with bcrypt on the blocking pool
//! - HS256 tokens, one hour lifetime, no algorithm substitution
//! - A valid token alone is not enough; a live session is also required

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{Claims, TokenCodec};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, MySqlAuthRepository};
pub use presentation::{AuthAppState, AuthMiddlewareState, auth_routes, identity_guard};

/// `users` and `sessions` DDL, applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
