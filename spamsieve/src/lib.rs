// spamsieve/src/lib.rs
//! # SpamSieve CLI Application
//!
//! This crate provides the command-line interface for the `spamsieve-core`
//! detection engines: one-shot scans, an interactive prompt, dataset
//! evaluation, keyword mining and automaton introspection.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

use anyhow::Result;

use crate::cli::{Cli, Commands};

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    match &cli.command {
        Commands::Scan(cmd) => commands::scan::run_scan(cmd).map(|_| ()),
        Commands::Eval(cmd) => commands::eval::run_eval(cmd).map(|_| ()),
        Commands::Interactive(cmd) => commands::interactive::run_interactive(cmd),
        Commands::Links(cmd) => commands::links::run_links(cmd),
        Commands::Extract(cmd) => commands::extract::run_extract(cmd).map(|_| ()),
    }
}
