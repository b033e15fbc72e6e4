// spamsieve/src/commands/mod.rs
//! Command implementations for the spamsieve CLI, plus the configuration
//! loading they share.

pub mod eval;
pub mod extract;
pub mod interactive;
pub mod links;
pub mod scan;

use anyhow::{Context, Result};
use log::debug;
use spamsieve_core::config::{discover_user_config, merge_configs, DetectorConfig};

use crate::cli::ConfigArgs;

/// Loads the built-in configuration, merges the user's configuration over it
/// and removes disabled keywords.
///
/// An explicit `--config` file is used instead of the discovered one.
pub fn load_config(args: &ConfigArgs) -> Result<DetectorConfig> {
    let defaults = DetectorConfig::load_default().context("Failed to load built-in configuration")?;
    let user = match &args.config {
        Some(path) => Some(DetectorConfig::load_from_file(path)?),
        None => discover_user_config()?,
    };
    let mut config = merge_configs(defaults, user);

    if !args.disable.is_empty() {
        config.exclude_keywords(&args.disable);
    }
    debug!("Effective configuration has {} keyword(s).", config.keywords.len());
    Ok(config)
}
