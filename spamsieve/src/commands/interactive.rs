//! `spamsieve interactive`: a read-score-print loop.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;
use spamsieve_core::{DetectionEngine, EngineKind};

use crate::cli::InteractiveCommand;
use crate::commands::load_config;
use crate::ui::output;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "q"];

/// True when `line` asks to leave the loop.
pub fn is_exit_command(line: &str) -> bool {
    let trimmed = line.trim();
    EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w))
}

/// Scores every line read from `input` until an exit word or end of input.
/// Returns the number of messages analysed.
pub fn run_loop<R: BufRead, W: Write>(
    engine: &dyn DetectionEngine,
    input: R,
    out: &mut W,
    enable_colors: bool,
) -> Result<usize> {
    writeln!(out, "Enter text to analyze (type 'exit' to quit):")?;
    let mut analysed = 0;
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if is_exit_command(&line) {
            break;
        }
        let report = engine.analyze(&line)?;
        output::print_report(out, &report, enable_colors)?;
        analysed += 1;
    }
    info!("Interactive session ended after {} message(s).", analysed);
    Ok(analysed)
}

pub fn run_interactive(cmd: &InteractiveCommand) -> Result<()> {
    let config = load_config(&cmd.config)?;
    let kind: EngineKind = cmd.engine.into();
    let engine = kind.build(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut out = stdout.lock();
    run_loop(engine.as_ref(), stdin.lock(), &mut out, enable_colors)?;
    Ok(())
}
