//! Rendering of reports for the terminal.
//!
//! Tables are drawn with `comfy-table`. Colour is applied with `owo-colors`
//! only when the caller says the destination is a terminal; the renderers
//! themselves never inspect the environment, which keeps them testable.
//!
//! License: MIT OR APACHE 2.0

use std::io::{self, Write};

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::{AnsiColors, OwoColorize};
use spamsieve_core::{DetectionReport, EvaluationReport, NodeReport, Severity, WordCount};

/// Foreground colour used for each severity.
pub fn severity_color(severity: Severity) -> AnsiColors {
    match severity {
        Severity::NotSpam => AnsiColors::Green,
        Severity::Likely => AnsiColors::Yellow,
        Severity::MostLikely => AnsiColors::BrightRed,
        Severity::Definite => AnsiColors::Red,
    }
}

fn paint(text: &str, color: AnsiColors, enable_colors: bool) -> String {
    if enable_colors {
        text.color(color).bold().to_string()
    } else {
        text.to_string()
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Keyword counts as a two-column table, most frequent first.
pub fn keyword_table(report: &DetectionReport) -> Table {
    let mut rows: Vec<(&str, usize)> = report.matches.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = new_table(&["Keyword", "Count"]);
    for (keyword, count) in rows {
        table.add_row(vec![
            Cell::new(keyword),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Writes a human-readable analysis of one text.
pub fn print_report<W: Write>(writer: &mut W, report: &DetectionReport, enable_colors: bool) -> io::Result<()> {
    if report.matches.is_empty() {
        writeln!(writer, "No keywords found.")?;
    } else {
        writeln!(writer, "{}", keyword_table(report))?;
    }

    if let Some(indicators) = &report.indicators {
        writeln!(writer, "Special characters: {}", indicators.special_chars)?;
        writeln!(writer, "Capitalized words: {}", indicators.capitalized_words)?;
        writeln!(writer, "Spam phrases: {}", indicators.spam_phrases)?;
        writeln!(writer, "URLs: {}", indicators.urls)?;
        writeln!(writer, "Dollar amounts: {}", indicators.dollar_amounts)?;
        if let Some(metrics) = &indicators.message_metrics {
            writeln!(writer, "Message entropy: {:.2}", metrics.entropy)?;
            writeln!(writer, "Unique words: {} of {}", metrics.unique_words, metrics.word_count)?;
            writeln!(writer, "Length score: {:.2}", metrics.length_score)?;
        }
    }

    let label = report.severity.label().to_uppercase();
    writeln!(
        writer,
        "Score: {} ({} engine) -> {}",
        report.score,
        report.engine,
        paint(&label, severity_color(report.severity), enable_colors)
    )?;
    Ok(())
}

/// Writes the failure-link table.
pub fn print_links<W: Write>(writer: &mut W, rows: &[NodeReport]) -> io::Result<()> {
    let mut table = new_table(&["Node", "Path", "Failure", "Failure Path", "End", "Outputs"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.node_id).set_alignment(CellAlignment::Right),
            Cell::new(&row.path),
            Cell::new(row.failure_id).set_alignment(CellAlignment::Right),
            Cell::new(&row.failure_path),
            Cell::new(if row.is_end { "yes" } else { "" }),
            Cell::new(row.outputs.join(", ")),
        ]);
    }
    writeln!(writer, "{}", table)
}

/// Writes the accuracy summary and the per-severity histogram.
pub fn print_evaluation<W: Write>(writer: &mut W, report: &EvaluationReport, enable_colors: bool) -> io::Result<()> {
    let Some(accuracy) = report.accuracy() else {
        return writeln!(writer, "No test data found.");
    };

    writeln!(writer, "Tested {} samples", report.total)?;
    writeln!(writer, "Correct predictions: {}", report.correct)?;
    writeln!(writer, "False positives: {}", report.false_positives)?;
    writeln!(writer, "False negatives: {}", report.false_negatives)?;
    writeln!(writer, "Accuracy: {:.2}%", accuracy)?;

    let mut table = new_table(&["Predicted severity", "Samples"]);
    for (severity, count) in &report.severities {
        table.add_row(vec![
            Cell::new(paint(severity.label(), severity_color(*severity), enable_colors)),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    writeln!(writer, "{}", table)
}

/// Writes mined keyword suggestions.
pub fn print_word_counts<W: Write>(writer: &mut W, words: &[WordCount]) -> io::Result<()> {
    if words.is_empty() {
        return writeln!(writer, "No words found.");
    }
    writeln!(writer, "Most common spam-related words:")?;
    let mut table = new_table(&["Word", "Count"]);
    for entry in words {
        table.add_row(vec![
            Cell::new(&entry.word),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
        ]);
    }
    writeln!(writer, "{}", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamsieve_core::{headless_analyze, DetectorConfig, EngineKind};

    fn render(report: &DetectionReport, colors: bool) -> String {
        let mut out = Vec::new();
        print_report(&mut out, report, colors).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_report_has_no_escape_codes() {
        let config = DetectorConfig::with_keywords(["free", "cash"]);
        let report = headless_analyze(&config, "free c4sh free", EngineKind::Keyword).unwrap();
        let text = render(&report, false);
        assert!(text.contains("free"));
        assert!(text.contains("cash"));
        assert!(text.contains("MOST LIKELY SPAM"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_report_strips_back_to_plain() {
        let config = DetectorConfig::with_keywords(["free"]);
        let report = headless_analyze(&config, "fr3e", EngineKind::Keyword).unwrap();
        let colored = render(&report, true);
        assert!(colored.contains('\u{1b}'));
        let stripped = String::from_utf8(strip_ansi_escapes::strip(colored.as_bytes())).unwrap();
        assert_eq!(stripped, render(&report, false));
    }

    #[test]
    fn test_empty_evaluation() {
        let mut out = Vec::new();
        print_evaluation(&mut out, &EvaluationReport::default(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No test data found.\n");
    }
}
