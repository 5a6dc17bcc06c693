//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryAuthRepository;
pub use mysql::MySqlAuthRepository;
