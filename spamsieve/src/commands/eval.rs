//! `spamsieve eval`: accuracy against a labelled dataset.

use std::io::{self, Write};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use spamsieve_core::{evaluate, read_samples_from_file, EngineKind, EvaluationReport};

use crate::cli::EvalCommand;
use crate::commands::load_config;
use crate::ui::output;

pub fn run_eval(cmd: &EvalCommand) -> Result<EvaluationReport> {
    let config = load_config(&cmd.config)?;
    let samples = read_samples_from_file(&cmd.dataset)?;

    let kind: EngineKind = cmd.engine.into();
    let engine = kind.build(&config)?;
    let report = evaluate(engine.as_ref(), &samples)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        let value = serde_json::json!({
            "total": report.total,
            "correct": report.correct,
            "false_positives": report.false_positives,
            "false_negatives": report.false_negatives,
            "accuracy": report.accuracy(),
            "severities": &report.severities,
        });
        serde_json::to_writer_pretty(&mut out, &value).context("Failed to serialize evaluation report")?;
        writeln!(out)?;
    } else {
        output::print_evaluation(&mut out, &report, io::stdout().is_terminal())?;
    }
    out.flush()?;
    Ok(report)
}
