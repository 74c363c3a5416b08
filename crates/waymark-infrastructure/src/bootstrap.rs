//! Router bootstrap
//!
//! Turns a loaded [`AppConfig`] into an initialized [`Router`] over every
//! fragment linked into the running binary.

use tracing::{info, warn};
use waymark_application::ports::Artifact;
use waymark_application::{LinkedArtifact, Router, RouterOptions};

use crate::config::AppConfig;

/// Build a router from configuration and run discovery over linked fragments
pub fn init_router(config: &AppConfig) -> Router {
    init_router_with(config, &[&LinkedArtifact])
}

/// Build a router from configuration and run discovery over `artifacts`
///
/// Configured preload groups are materialized during discovery; a group
/// that no module registered is logged and skipped.
pub fn init_router_with(config: &AppConfig, artifacts: &[&dyn Artifact]) -> Router {
    let router = Router::with_options(RouterOptions::from(&config.router));
    let report = router.initialize(artifacts);
    if !report.is_clean() {
        warn!(
            artifacts_skipped = report.artifacts_skipped.len(),
            fragments_skipped = report.fragments_skipped.len(),
            conflicts = report.conflicts.len(),
            "Router initialized with discovery issues"
        );
    }
    info!(
        preloaded = router.materialization_count(),
        max_dependency_depth = config.router.max_dependency_depth,
        "Router ready"
    );
    router
}
