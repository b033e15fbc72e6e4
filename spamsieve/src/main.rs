// spamsieve/src/main.rs
//! spamsieve entry point.

use anyhow::Result;
use clap::Parser;
use spamsieve::cli::Cli;

fn main() -> Result<()> {
    spamsieve::run(Cli::parse())
}
