//! Service lookup port used by service-reference fields

use crate::error::Result;
use crate::value_objects::SharedService;

/// Resolves a service path to its published singleton
///
/// Implemented by the router; injection uses it so that a target can depend
/// on another registered service purely through a field's type.
pub trait ServiceLocator: Send + Sync {
    fn locate_service(&self, path: &str) -> Result<SharedService>;
}
