// spamsieve/src/cli.rs
//! This file defines the command-line interface (CLI) for the spamsieve application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use spamsieve_core::{EngineKind, DEFAULT_TOP_WORDS};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "spamsieve",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Score text for spam keywords, including leetspeak spellings",
    long_about = "spamsieve counts spam keywords in text with a leetspeak-aware Aho-Corasick automaton, so that 'fr33', 'w1n' and 'c4$h' count as 'free', 'win' and 'cash'. It can also score text on heuristic indicators, measure accuracy against a labelled CSV dataset and suggest new keywords from known spam.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `spamsieve` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scores a text, an input file or stdin.
    #[command(about = "Score a text, an input file or stdin for spam.")]
    Scan(ScanCommand),

    /// Measures accuracy against a labelled CSV dataset.
    #[command(about = "Measure detection accuracy against a labelled CSV file (text,label).")]
    Eval(EvalCommand),

    /// Reads messages line by line and scores each one.
    #[command(about = "Score messages typed at a prompt, one per line. Type 'exit' to quit.")]
    Interactive(InteractiveCommand),

    /// Prints the automaton's failure links.
    #[command(about = "Print the failure-link table of the keyword automaton.")]
    Links(LinksCommand),

    /// Suggests keywords from the spam rows of a labelled CSV dataset.
    #[command(about = "Suggest new keywords from the most common words in spam messages.")]
    Extract(ExtractCommand),
}

/// Configuration arguments shared by every command that builds a detector.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a custom configuration file (YAML), merged over the defaults.
    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML), merged over the built-in defaults.")]
    pub config: Option<PathBuf>,

    /// Explicitly disable these keywords (comma-separated).
    #[arg(long = "disable", short = 'x', value_delimiter = ',', help = "Disable these keywords (comma-separated).")]
    pub disable: Vec<String>,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Text to scan.
    #[arg(long, short = 't', conflicts_with = "input_file", help = "Scan this text instead of reading stdin.")]
    pub text: Option<String>,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Select which detection engine to use.
    #[arg(long = "engine", short = 'e', value_enum, default_value = "keyword", help = "Select a detection engine.")]
    pub engine: EngineChoice,

    /// Include the message-length metrics in heuristic scoring.
    #[arg(long = "metrics", help = "Include entropy and message-length metrics (heuristic engine only).")]
    pub metrics: bool,

    /// Remove ANSI escape sequences from the input before scanning.
    #[arg(long = "strip-ansi", help = "Remove ANSI escape sequences from the input before scanning.")]
    pub strip_ansi: bool,

    /// Print the report as JSON to stdout.
    #[arg(long = "json", help = "Print the report as JSON.")]
    pub json: bool,

    /// Exit with a non-zero code if the score exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with a non-zero code if the score exceeds this threshold.")]
    pub fail_over_threshold: Option<usize>,
}

/// Arguments for the `eval` command.
#[derive(Parser, Debug)]
pub struct EvalCommand {
    /// The labelled dataset.
    #[arg(value_name = "CSV", help = "CSV file with a header row and text,label rows.")]
    pub dataset: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long = "engine", short = 'e', value_enum, default_value = "keyword", help = "Select a detection engine.")]
    pub engine: EngineChoice,

    #[arg(long = "json", help = "Print the evaluation report as JSON.")]
    pub json: bool,
}

/// Arguments for the `interactive` command.
#[derive(Parser, Debug)]
pub struct InteractiveCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long = "engine", short = 'e', value_enum, default_value = "keyword", help = "Select a detection engine.")]
    pub engine: EngineChoice,
}

/// Arguments for the `links` command.
#[derive(Parser, Debug)]
pub struct LinksCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Build the automaton from these keywords instead of the configured ones.
    #[arg(long = "keywords", short = 'k', value_delimiter = ',', help = "Use these keywords (comma-separated) instead of the configured ones.")]
    pub keywords: Vec<String>,

    /// Expand keywords through the substitution table.
    #[arg(long = "with-substitutions", help = "Expand keywords through the substitution table (the table can get large).")]
    pub with_substitutions: bool,

    /// Only list links that point somewhere other than the root.
    #[arg(long = "non-trivial", help = "Only list failure links that do not point at the root.")]
    pub non_trivial: bool,

    #[arg(long = "json", help = "Print the table as JSON.")]
    pub json: bool,
}

/// Arguments for the `extract` command.
#[derive(Parser, Debug)]
pub struct ExtractCommand {
    /// The labelled dataset.
    #[arg(value_name = "CSV", help = "CSV file with a header row and text,label rows.")]
    pub dataset: PathBuf,

    /// Number of words to report.
    #[arg(long = "top", short = 'n', value_name = "N", default_value_t = DEFAULT_TOP_WORDS, help = "Number of words to report.")]
    pub top: usize,

    /// Mine every row, not only the spam-labelled ones.
    #[arg(long = "all-rows", help = "Mine every row, not only the spam-labelled ones.")]
    pub all_rows: bool,

    #[arg(long = "json", help = "Print the word counts as JSON.")]
    pub json: bool,
}

/// Enum for selecting the detection engine.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EngineChoice {
    /// The leetspeak-aware keyword automaton.
    Keyword,
    /// Special characters, capitals, phrases, links and money amounts.
    Heuristic,
}

impl From<EngineChoice> for EngineKind {
    fn from(choice: EngineChoice) -> Self {
        match choice {
            EngineChoice::Keyword => EngineKind::Keyword,
            EngineChoice::Heuristic => EngineKind::Heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_arguments() {
        let cli = Cli::parse_from(["spamsieve", "scan", "--text", "fr33", "--engine", "heuristic", "-x", "free,win"]);
        match cli.command {
            Commands::Scan(scan) => {
                assert_eq!(scan.text.as_deref(), Some("fr33"));
                assert_eq!(scan.engine, EngineChoice::Heuristic);
                assert_eq!(scan.config.disable, vec!["free", "win"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_text_conflicts_with_input_file() {
        let result = Cli::try_parse_from(["spamsieve", "scan", "--text", "a", "--input-file", "b.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_default_top() {
        let cli = Cli::parse_from(["spamsieve", "extract", "data.csv"]);
        match cli.command {
            Commands::Extract(extract) => assert_eq!(extract.top, DEFAULT_TOP_WORDS),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
