//! Use cases
//!
//! The router and its fluent navigation builder.

pub mod navigation;
pub mod router;

pub use navigation::Navigation;
pub use router::{GroupInfo, Router, RouterOptions};
