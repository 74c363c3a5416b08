//! # Waymark
//!
//! A symbolic-path module registry. Modules declare screens and services
//! under `/group/name` paths at build time; callers resolve a path string
//! into a live instance at run time without a compile-time reference to the
//! module that provides it.
//!
//! ## Example
//!
//! ```ignore
//! use waymark::{Extras, Router};
//!
//! let router = Router::new();
//! router.initialize_linked();
//!
//! let target = router
//!     .build("/library3/MainScreen")
//!     .with("name", "ada")
//!     .with("age", 36)
//!     .navigate()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - descriptors, parameters, injection shapes, errors
//! - `application` - discovery, lazy group tables, the resolution engine
//! - `infrastructure` - configuration, logging, bootstrap

pub mod cli;

/// Domain layer - core types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use waymark_domain::*;
}

/// Application layer - discovery and resolution
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use waymark_application::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use waymark_infrastructure::*;
}

// Re-export commonly used types at the crate root
pub use domain::*;

pub use application::{
    DiscoveryReport, GroupInfo, LinkedArtifact, Navigation, Router, RouterOptions, route_extras,
    route_module,
};
pub use infrastructure::{AppConfig, ConfigLoader, init_router};
