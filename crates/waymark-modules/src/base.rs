//! Shared contracts

use serde::{Deserialize, Serialize};
use waymark_domain::Transferable;

/// Service contract exposed across modules
pub trait ComponentService: Send + Sync {
    /// Perform the service's work, returning what it did
    fn do_something(&self) -> String;
}

/// Structured payload handed between screens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestObj {
    pub id: i32,
    pub label: String,
}

impl Transferable for TestObj {}
