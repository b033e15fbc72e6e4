// spamsieve/src/logger.rs
//! Logging setup for the `spamsieve` binary.
//!
//! Log records go to stderr so that stdout stays clean for reports and JSON.
//! License: MIT OR APACHE 2.0

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises `env_logger`.
///
/// An explicit `level` wins over `RUST_LOG`. Without one, `RUST_LOG` is
/// honoured and defaults to `warn`. Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}

/// Maps the global `--quiet` / `--debug` flags onto an explicit level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
