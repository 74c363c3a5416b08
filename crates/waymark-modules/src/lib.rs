//! Feature modules
//!
//! Each submodule stands in for an independently compiled feature module:
//! it declares its routes with [`route_module!`](waymark_application::route_module)
//! and its injectable fields with
//! [`route_extras!`](waymark_application::route_extras), and nothing else in
//! the workspace names its types. Linking this crate is enough for discovery
//! to find them.
//!
//! | Module | Group | Routes |
//! |--------|-------|--------|
//! | [`app`] | `app` | `/app/MainScreen` |
//! | [`library2`] | `library2` | `/library2/StringService`, `/library2/EchoService` |
//! | [`library3`] | `library3` | `/library3/MainScreen` |
//!
//! [`base`] holds the contracts and payload types modules share, the only
//! compile-time surface between them.

pub mod app;
pub mod base;
pub mod library2;
pub mod library3;
