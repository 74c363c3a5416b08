//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the router.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, `WAYMARK_*` env |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Config-driven router construction and discovery |
//! | [`constants`] | Centralized configuration constants |
//! | [`error_ext`] | Context helpers mapping foreign errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{init_router, init_router_with};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
