//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `waymark_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "waymark.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "waymark";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WAYMARK";

/// Separator between nesting levels in environment keys
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "WAYMARK_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used when the log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "waymark";

/// Maximum number of daily log files to keep
pub const LOG_MAX_FILES: usize = 5;
