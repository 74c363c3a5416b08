//! Error handling types
//!
//! Every failure the router can report is a [`RouterError`]. Resolution
//! failures are ordinary values: callers are expected to branch on
//! "route does not exist" the same way they branch on success.

use thiserror::Error;

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors surfaced by discovery, resolution and injection
#[derive(Error, Debug)]
pub enum RouterError {
    /// `resolve` was called before `initialize` completed
    #[error("Router not initialized: call initialize() before resolving routes")]
    NotInitialized,

    /// The path does not start with `/`
    #[error("Malformed path '{path}': a route path must start with '/'")]
    MalformedPath {
        /// The offending path
        path: String,
    },

    /// The path has no group segment between the first two `/`
    #[error("Missing group in path '{path}': expected '/<group>/<name>'")]
    MissingGroup {
        /// The offending path
        path: String,
    },

    /// No root fragment registered the group (the whole module is absent)
    #[error("Group not found: '{group}' (while resolving '{path}')")]
    GroupNotFound {
        /// Group extracted from the path
        group: String,
        /// Path being resolved
        path: String,
    },

    /// The group exists but does not contain the path
    #[error("Route not found: '{path}' in group '{group}'")]
    RouteNotFound {
        /// Group the lookup ran against
        group: String,
        /// Path being resolved
        path: String,
    },

    /// The registry entry was valid but the target could not be built
    #[error("Failed to construct target '{target}' for '{path}': {reason}")]
    TargetConstructionFailed {
        /// Path being resolved
        path: String,
        /// Type name of the target
        target: String,
        /// Why construction failed
        reason: String,
    },

    /// A field shape or value the injector cannot handle
    #[error("Unsupported extra type for {target}.{field}: {detail}")]
    UnsupportedExtraType {
        /// Type name of the injection target
        target: String,
        /// Declared field name
        field: String,
        /// What was rejected
        detail: String,
    },

    /// Configuration or logging bootstrap failure
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RouterError {
    /// Create a malformed path error
    pub fn malformed_path<S: Into<String>>(path: S) -> Self {
        Self::MalformedPath { path: path.into() }
    }

    /// Create a missing group error
    pub fn missing_group<S: Into<String>>(path: S) -> Self {
        Self::MissingGroup { path: path.into() }
    }

    /// Create a group not found error
    pub fn group_not_found<G: Into<String>, P: Into<String>>(group: G, path: P) -> Self {
        Self::GroupNotFound {
            group: group.into(),
            path: path.into(),
        }
    }

    /// Create a route not found error
    pub fn route_not_found<G: Into<String>, P: Into<String>>(group: G, path: P) -> Self {
        Self::RouteNotFound {
            group: group.into(),
            path: path.into(),
        }
    }

    /// Create a construction failure
    pub fn construction_failed<P, T, R>(path: P, target: T, reason: R) -> Self
    where
        P: Into<String>,
        T: Into<String>,
        R: Into<String>,
    {
        Self::TargetConstructionFailed {
            path: path.into(),
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported extra type error
    pub fn unsupported_extra<T, F, D>(target: T, field: F, detail: D) -> Self
    where
        T: Into<String>,
        F: Into<String>,
        D: Into<String>,
    {
        Self::UnsupportedExtraType {
            target: target.into(),
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl RouterError {
    /// True for the "this route does not exist" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound { .. } | Self::RouteNotFound { .. })
    }

    /// The path this error refers to, when it refers to one
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MalformedPath { path }
            | Self::MissingGroup { path }
            | Self::GroupNotFound { path, .. }
            | Self::RouteNotFound { path, .. }
            | Self::TargetConstructionFailed { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The group this error refers to, when it refers to one
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::GroupNotFound { group, .. } | Self::RouteNotFound { group, .. } => Some(group),
            _ => None,
        }
    }
}
