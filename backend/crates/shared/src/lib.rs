//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Opaque 24-character identifiers
//! - The authenticated identity carried through a request
//! - Route registration tagged with its access level
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod identity;
pub mod json;
#[cfg(feature = "axum")]
pub mod routing;
