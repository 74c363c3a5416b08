//! Router configuration types

use serde::{Deserialize, Serialize};
use waymark_application::RouterOptions;
use waymark_domain::constants::DEFAULT_MAX_DEPENDENCY_DEPTH;

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Groups materialized right after discovery
    pub preload_groups: Vec<String>,

    /// Maximum nesting of service dependencies
    pub max_dependency_depth: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            preload_groups: Vec::new(),
            max_dependency_depth: DEFAULT_MAX_DEPENDENCY_DEPTH,
        }
    }
}

impl From<&RouterConfig> for RouterOptions {
    fn from(config: &RouterConfig) -> Self {
        RouterOptions::default()
            .with_preload_groups(config.preload_groups.iter().cloned())
            .with_max_dependency_depth(config.max_dependency_depth)
    }
}
