//! `spamsieve scan`: score one text.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use spamsieve_core::{redact_text_for_log, DetectionReport, EngineKind};

use crate::cli::ScanCommand;
use crate::commands::load_config;
use crate::ui::output;

/// Reads the text to scan from `--text`, `--input-file` or stdin, in that order.
pub fn read_input(cmd: &ScanCommand) -> Result<String> {
    let raw = if let Some(text) = &cmd.text {
        text.clone()
    } else if let Some(path) = &cmd.input_file {
        info!("Reading input from file: {}", path.display());
        fs::read_to_string(path).with_context(|| format!("Failed to read input file {}", path.display()))?
    } else {
        debug!("Reading input from stdin.");
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        buffer
    };

    if cmd.strip_ansi {
        let stripped = strip_ansi_escapes::strip(raw.as_bytes());
        Ok(String::from_utf8_lossy(&stripped).into_owned())
    } else {
        Ok(raw)
    }
}

/// Runs the `scan` command and returns the report it printed.
pub fn run_scan(cmd: &ScanCommand) -> Result<DetectionReport> {
    let mut config = load_config(&cmd.config)?;
    if cmd.metrics {
        config.heuristics.message_metrics = true;
    }
    let input = read_input(cmd)?;
    debug!("Scanning {}", redact_text_for_log(&input));

    let kind: EngineKind = cmd.engine.into();
    let engine = kind.build(&config)?;
    let report = engine.analyze(&input)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to serialize report")?;
        writeln!(out)?;
    } else {
        output::print_report(&mut out, &report, io::stdout().is_terminal())?;
    }
    out.flush()?;

    if let Some(threshold) = cmd.fail_over_threshold {
        if report.score > threshold {
            bail!(
                "FAIL-OVER triggered: score {} exceeds the specified threshold of {}.",
                report.score,
                threshold
            );
        }
    }
    Ok(report)
}
