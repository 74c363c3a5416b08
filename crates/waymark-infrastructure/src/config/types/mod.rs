//! Configuration types module

pub mod app;
pub mod logging;
pub mod router;

// Re-export main types
pub use app::*;
