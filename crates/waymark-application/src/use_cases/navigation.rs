//! Fluent resolution
//!
//! ```ignore
//! let target = router
//!     .build("/app/Profile")
//!     .with("age", 42)
//!     .with("name", "zhao")
//!     .navigate()?;
//! ```

use tracing::debug;
use waymark_domain::{ExtraValue, Extras, Result, Target, Transferable};

use super::router::Router;

/// A pending resolution of one path
pub struct Navigation<'r> {
    router: &'r Router,
    path: String,
    extras: Extras,
}

impl<'r> Navigation<'r> {
    pub(crate) fn new(router: &'r Router, path: String) -> Self {
        Self {
            router,
            path,
            extras: Extras::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    /// Add one parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.extras.insert(key, value);
        self
    }

    /// Add every parameter of `extras`, replacing same-named ones
    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras.extend(extras);
        self
    }

    /// Add a structured parameter
    pub fn with_transferable<T: Transferable>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        self.extras.insert_transferable(key, value)?;
        Ok(self)
    }

    /// Resolve the path with the collected parameters
    pub fn navigate(self) -> Result<Target> {
        debug!(path = %self.path, extras = self.extras.len(), "Navigating");
        self.router.resolve(&self.path, &self.extras)
    }
}
