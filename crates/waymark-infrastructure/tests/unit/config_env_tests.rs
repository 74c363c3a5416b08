//! Environment override tests
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p waymark-infrastructure --test unit config_env -- --test-threads=1 --ignored
//! ```
//!
//! # Safety
//!
//! Rust 2024 requires `unsafe` for `env::set_var`/`env::remove_var`.
//! Tests MUST run with `--test-threads=1` to prevent data races.

use std::env;
use std::fs;

use tempfile::TempDir;
use waymark_infrastructure::config::ConfigLoader;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("waymark.toml");
    fs::write(&path, "[router]\nmax_dependency_depth = 8\n").unwrap();

    set_env("WAYMARK_ENVTEST_ROUTER__MAX_DEPENDENCY_DEPTH", "3");
    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("WAYMARK_ENVTEST")
        .load();
    remove_env("WAYMARK_ENVTEST_ROUTER__MAX_DEPENDENCY_DEPTH");

    assert_eq!(config.unwrap().router.max_dependency_depth, 3);
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_nesting_keeps_underscored_keys() {
    set_env("WAYMARK_ENVNEST_LOGGING__JSON_FORMAT", "true");
    set_env("WAYMARK_ENVNEST_ROUTER__PRELOAD_GROUPS", "[app, library3]");
    let config = ConfigLoader::new()
        .with_config_path("/nonexistent/waymark.toml")
        .with_env_prefix("WAYMARK_ENVNEST")
        .load();
    remove_env("WAYMARK_ENVNEST_LOGGING__JSON_FORMAT");
    remove_env("WAYMARK_ENVNEST_ROUTER__PRELOAD_GROUPS");

    let config = config.unwrap();
    assert!(config.logging.json_format);
    assert_eq!(config.router.preload_groups, vec!["app", "library3"]);
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_value_still_validated() {
    set_env("WAYMARK_ENVBAD_ROUTER__MAX_DEPENDENCY_DEPTH", "0");
    let result = ConfigLoader::new()
        .with_config_path("/nonexistent/waymark.toml")
        .with_env_prefix("WAYMARK_ENVBAD")
        .load();
    remove_env("WAYMARK_ENVBAD_ROUTER__MAX_DEPENDENCY_DEPTH");

    assert!(result.is_err());
}
