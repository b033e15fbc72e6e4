//! Defines the core `DetectionEngine` trait and the report every engine returns.
//!
//! The `DetectionEngine` trait provides a pluggable interface for different
//! detection methods (keyword automaton, heuristics). Callers hold a
//! `Box<dyn DetectionEngine>` and never need to know which one they got.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use serde::Serialize;

use crate::automaton::MatchResult;
use crate::scoring::{Severity, Verdict};

lazy_static! {
    /// Whether scanned text may appear verbatim in debug logs.
    static ref DEBUG_TEXT_ALLOWED: bool = {
        std::env::var("SPAMSIEVE_ALLOW_DEBUG_TEXT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A trait that defines the core functionality of a detection engine.
pub trait DetectionEngine: Send + Sync {
    /// Scores `text` and reports what was found.
    ///
    /// Empty or whitespace-only text is valid input and is never spam.
    fn analyze(&self, text: &str) -> Result<DetectionReport>;

    /// Short, stable identifier used in reports and on the command line.
    fn name(&self) -> &'static str;
}

/// Raw measurements taken by the heuristic engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeuristicIndicators {
    pub special_chars: usize,
    pub capitalized_words: usize,
    pub spam_phrases: usize,
    pub urls: usize,
    pub dollar_amounts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_metrics: Option<MessageMetrics>,
}

/// Message-length measurements, only computed when enabled in the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MessageMetrics {
    /// Shannon entropy, in bits, of the lower-cased alphanumeric characters.
    pub entropy: f64,
    pub word_count: usize,
    pub unique_words: usize,
    pub length_score: f64,
}

/// The outcome of analysing one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub engine: &'static str,
    /// Keyword (or phrase) occurrence counts.
    pub matches: MatchResult,
    pub score: usize,
    pub severity: Severity,
    pub is_spam: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<HeuristicIndicators>,
}

impl DetectionReport {
    pub fn new(engine: &'static str, matches: MatchResult, verdict: Verdict) -> Self {
        Self {
            engine,
            matches,
            score: verdict.score,
            severity: verdict.severity,
            is_spam: verdict.is_spam,
            indicators: None,
        }
    }

    pub fn with_indicators(mut self, indicators: HeuristicIndicators) -> Self {
        self.indicators = Some(indicators);
        self
    }
}

/// Returns `text` for logging only when `SPAMSIEVE_ALLOW_DEBUG_TEXT=true`,
/// otherwise a placeholder carrying the length.
pub fn redact_text_for_log(text: &str) -> String {
    if *DEBUG_TEXT_ALLOWED {
        text.to_string()
    } else {
        format!("[{} chars]", text.chars().count())
    }
}
