//! Command line interface
//!
//! Loads configuration, installs logging, runs discovery over the linked
//! fragments and then inspects or resolves routes.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use waymark_application::Router;
use waymark_domain::{ExtraValue, Extras, RouteKind, RouteSummary, Target};
use waymark_infrastructure::logging::init_logging;
use waymark_infrastructure::{ConfigLoader, init_router};

/// Command line interface for Waymark
#[derive(Parser, Debug)]
#[command(name = "waymark")]
#[command(about = "Waymark - inspect and resolve symbolic routes")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "WAYMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List indexed groups and whether they are loaded
    Groups,

    /// List routes, loading each listed group
    Routes {
        /// Only this group
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Print the discovery report
    Report,

    /// Resolve a path with parameters
    Resolve {
        /// Route path, e.g. `/library3/MainScreen`
        path: String,

        /// Parameter as `key=value` or `key=type:value`
        /// (types: bool, i8, i16, i32, i64, f32, f64, char, str, json,
        /// str-list, int-list, json-list)
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, ExtraValue)>,
    },
}

/// Run one command
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let router = init_router(&config);
    execute(&router, &cli.command, cli.json)
}

/// Run `command` against an initialized router
pub fn execute(router: &Router, command: &Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Groups => {
            let groups = router.groups()?;
            if json {
                print_json(&groups)?;
            } else {
                for group in &groups {
                    let routes = group
                        .routes
                        .map_or_else(|| "not loaded".to_string(), |n| format!("{n} routes"));
                    println!("{:<16} {:<40} {routes}", group.name, group.origin);
                }
            }
        }
        Command::Routes { group } => {
            let routes = list_routes(router, group.as_deref())?;
            if json {
                print_json(&routes)?;
            } else {
                for route in &routes {
                    println!("{:<8} {:<32} {}", route.kind, route.path, route.target);
                }
            }
        }
        Command::Report => {
            let report = router.report()?;
            if json {
                print_json(report)?;
            } else {
                println!(
                    "{} artifacts, {} roots, {} groups, {} injectors",
                    report.artifacts_scanned,
                    report.roots_loaded.len(),
                    report.groups_indexed,
                    report.injectors_indexed
                );
                for skipped in &report.fragments_skipped {
                    println!("skipped {}: {}", skipped.name, skipped.reason);
                }
                for conflict in &report.conflicts {
                    println!(
                        "conflict on group {}: kept {}, rejected {}",
                        conflict.group, conflict.kept, conflict.rejected
                    );
                }
            }
        }
        Command::Resolve { path, params } => {
            let extras: Extras = params.iter().cloned().collect();
            let target = router
                .resolve(path, &extras)
                .with_context(|| format!("Failed to resolve {path}"))?;
            let resolved = Resolved::new(&target, extras.len());
            if json {
                print_json(&resolved)?;
            } else {
                println!(
                    "{} {} -> {} ({} parameters)",
                    resolved.route.kind, resolved.route.path, resolved.route.target, resolved.parameters
                );
            }
        }
    }
    Ok(())
}

/// Routes of one group, or of every indexed group
pub fn list_routes(router: &Router, group: Option<&str>) -> anyhow::Result<Vec<RouteSummary>> {
    match group {
        Some(group) => Ok(router.routes(group)?),
        None => {
            let mut routes = Vec::new();
            for info in router.groups()? {
                routes.extend(router.routes(&info.name)?);
            }
            Ok(routes)
        }
    }
}

/// What `resolve` prints
#[derive(Debug, Serialize)]
pub struct Resolved {
    #[serde(flatten)]
    pub route: RouteSummary,
    pub parameters: usize,
    /// Whether the instance is a shared singleton
    pub shared: bool,
}

impl Resolved {
    pub fn new(target: &Target, parameters: usize) -> Self {
        Self {
            route: RouteSummary::from(target.descriptor().as_ref()),
            parameters,
            shared: target.kind() == RouteKind::Service,
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse `key=value` or `key=type:value` into a typed parameter
///
/// An unknown type prefix is kept as part of a string value.
pub fn parse_param(raw: &str) -> Result<(String, ExtraValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    let typed = match value.split_once(':') {
        Some((kind, rest)) => parse_typed(kind, rest)?,
        None => None,
    };
    let value = typed.unwrap_or_else(|| ExtraValue::Str(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_typed(kind: &str, raw: &str) -> Result<Option<ExtraValue>, String> {
    fn num<T: std::str::FromStr>(kind: &str, raw: &str) -> Result<T, String> {
        raw.trim()
            .parse()
            .map_err(|_| format!("'{raw}' is not a valid {kind}"))
    }

    let value = match kind {
        "bool" => ExtraValue::Bool(num(kind, raw)?),
        "i8" | "byte" => ExtraValue::Byte(num(kind, raw)?),
        "i16" | "short" => ExtraValue::Short(num(kind, raw)?),
        "i32" | "int" => ExtraValue::Int(num(kind, raw)?),
        "i64" | "long" => ExtraValue::Long(num(kind, raw)?),
        "f32" | "float" => ExtraValue::Float(num(kind, raw)?),
        "f64" | "double" => ExtraValue::Double(num(kind, raw)?),
        "char" => ExtraValue::Char(num(kind, raw)?),
        "str" => ExtraValue::Str(raw.to_string()),
        "str-list" => ExtraValue::StrList(split_list(raw).map(str::to_string).collect()),
        "int-list" => ExtraValue::IntList(
            split_list(raw)
                .map(|item| num("int", item))
                .collect::<Result<_, _>>()?,
        ),
        "json" => ExtraValue::Transferable(
            serde_json::from_str(raw).map_err(|e| format!("invalid json '{raw}': {e}"))?,
        ),
        "json-list" => {
            let items: Vec<serde_json::Value> =
                serde_json::from_str(raw).map_err(|e| format!("invalid json list '{raw}': {e}"))?;
            ExtraValue::TransferableList(items)
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}
