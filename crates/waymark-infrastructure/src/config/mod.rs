//! Configuration
//!
//! Figment-based loading of [`AppConfig`]: defaults, then a TOML file, then
//! `WAYMARK_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, RouterConfig};
