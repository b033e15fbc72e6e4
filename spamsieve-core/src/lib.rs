// spamsieve-core/src/lib.rs
//! # SpamSieve Core Library
//!
//! `spamsieve-core` provides the platform-independent logic for detecting
//! spam in short texts. Its centre is a multi-pattern Aho-Corasick automaton
//! whose keywords are expanded through a leetspeak substitution table at build
//! time, so that `fr33`, `w1n` and `c4$h` are recognised as `free`, `win` and
//! `cash` in a single linear pass over the text.
//!
//! ## Modules
//!
//! * `normalize`: Case folding shared by keywords and scanned text.
//! * `substitution`: The character -> stand-ins table.
//! * `variants`: Bounded expansion of a keyword into all its spellings.
//! * `automaton`: Trie construction, failure links, scanning and introspection.
//! * `compiler`: A process-wide cache of built automata.
//! * `scoring`: Severity levels, thresholds and the binary spam verdict.
//! * `engine`: The `DetectionEngine` trait and `DetectionReport`.
//! * `engines`: The keyword and heuristic engines.
//! * `headless`: One-shot analysis helpers.
//! * `evaluation`: Accuracy measurement over labelled CSV datasets.
//! * `mining`: Frequency-based keyword suggestions.
//! * `config`: YAML configuration loading, merging and validation.
//!
//! ## Usage Example
//!
//! ```rust
//! use spamsieve_core::{headless_analyze, DetectorConfig, EngineKind, Severity};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = DetectorConfig::with_keywords(["free", "win"]);
//!
//!     let report = headless_analyze(
//!         &config,
//!         "Congratulations! You are a w1nner! Claim your fr33 prize now!",
//!         EngineKind::Keyword,
//!     )?;
//!
//!     assert_eq!(report.matches.count("win"), 1);
//!     assert_eq!(report.matches.count("free"), 1);
//!     assert_eq!(report.severity, Severity::Likely);
//!     assert!(report.is_spam);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Automaton construction returns [`SpamSieveError`], so callers can tell an
//! empty keyword from an over-large expansion. Configuration loading and the
//! engines use `anyhow::Error` with context attached.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod automaton;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod evaluation;
pub mod headless;
pub mod mining;
pub mod normalize;
pub mod scoring;
pub mod substitution;
pub mod variants;

/// Re-exports the automaton and its scan results.
pub use automaton::{Automaton, MatchResult, NodeReport, ScanCursor};

/// Re-exports the cached automaton builder.
pub use compiler::{clear_automaton_cache, compile_automaton, get_or_compile_automaton};

/// Re-exports the configuration types and functions.
pub use config::{
    config_candidate_paths,
    discover_user_config,
    merge_configs,
    DetectorConfig,
    HeuristicConfig,
    CONFIG_ENV_VAR,
    MAX_KEYWORD_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SpamSieveError;

/// Re-exports the engine trait, its report and the concrete engines.
pub use engine::{redact_text_for_log, DetectionEngine, DetectionReport, HeuristicIndicators, MessageMetrics};
pub use engines::heuristic_engine::HeuristicEngine;
pub use engines::keyword_engine::KeywordEngine;

pub use evaluation::{evaluate, read_samples, read_samples_from_file, EvaluationReport, LabelledSample};
pub use headless::{headless_analyze, EngineKind};
pub use mining::{top_words, WordCount, DEFAULT_TOP_WORDS};
pub use normalize::canonicalize;
pub use scoring::{spam_weight, ScoringConfig, Severity, SeverityThresholds, Verdict};
pub use substitution::{SubstitutionTable, DEFAULT_SUBSTITUTIONS};
pub use variants::{generate_variants, variant_count, VariantLimits, DEFAULT_MAX_VARIANTS_PER_KEYWORD};
