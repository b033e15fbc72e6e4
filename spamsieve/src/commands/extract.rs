//! `spamsieve extract`: suggest keywords from known spam.

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::info;
use spamsieve_core::{read_samples_from_file, top_words, WordCount};

use crate::cli::ExtractCommand;
use crate::ui::output;

pub fn run_extract(cmd: &ExtractCommand) -> Result<Vec<WordCount>> {
    let samples = read_samples_from_file(&cmd.dataset)?;
    let texts: Vec<&str> = samples
        .iter()
        .filter(|s| cmd.all_rows || s.is_spam)
        .map(|s| s.text.as_str())
        .collect();
    info!("Mining {} of {} row(s).", texts.len(), samples.len());

    let words = top_words(texts, cmd.top);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cmd.json {
        serde_json::to_writer_pretty(&mut out, &words).context("Failed to serialize word counts")?;
        writeln!(out)?;
    } else {
        output::print_word_counts(&mut out, &words)?;
    }
    out.flush()?;
    Ok(words)
}
