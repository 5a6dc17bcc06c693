//! linkboard API server
//!
//! Wires the auth and post crates into one HTTP surface:
//! - `config` - environment and dotenv loading
//! - `app` - router assembly, panic guard, static files, SPA fallback

pub mod app;
pub mod config;

pub use app::{HttpOptions, build_app};
pub use config::{AppConfig, ConfigError};
