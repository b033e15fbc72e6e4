//! A `DetectionEngine` that counts leetspeak-tolerant keyword occurrences with
//! the shared Aho-Corasick automaton and turns the total into a verdict.
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use crate::automaton::Automaton;
use crate::compiler::get_or_compile_automaton;
use crate::config::DetectorConfig;
use crate::engine::{redact_text_for_log, DetectionEngine, DetectionReport};
use crate::scoring::{spam_weight, ScoringConfig};

#[derive(Debug, Clone)]
pub struct KeywordEngine {
    automaton: Arc<Automaton>,
    scoring: ScoringConfig,
}

impl KeywordEngine {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let automaton = get_or_compile_automaton(config)
            .context("Failed to build keyword automaton for KeywordEngine")?;
        Ok(Self::from_automaton(automaton, config.scoring))
    }

    /// Wraps an automaton that was built elsewhere.
    pub fn from_automaton(automaton: Arc<Automaton>, scoring: ScoringConfig) -> Self {
        Self { automaton, scoring }
    }
}

impl DetectionEngine for KeywordEngine {
    fn analyze(&self, text: &str) -> Result<DetectionReport> {
        let matches = self.automaton.scan(text);
        let verdict = self.scoring.judge(spam_weight(&matches));
        debug!(
            "Keyword scan of {}: {} distinct keyword(s), weight {}, {}.",
            redact_text_for_log(text),
            matches.len(),
            verdict.score,
            verdict.severity
        );
        Ok(DetectionReport::new(self.name(), matches, verdict))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Severity;

    fn engine(keywords: &[&str]) -> KeywordEngine {
        KeywordEngine::new(&DetectorConfig::with_keywords(keywords.iter().copied())).unwrap()
    }

    #[test]
    fn test_leetspeak_spellings_are_detected() {
        let engine = engine(&["free", "win"]);
        let report = engine
            .analyze("Congratulations! You are a w1nner! Claim your fr33 prize now!")
            .unwrap();
        assert_eq!(report.matches.count("win"), 1);
        assert_eq!(report.matches.count("free"), 1);
        assert_eq!(report.score, 2);
        assert_eq!(report.severity, Severity::Likely);
        assert!(report.is_spam);
    }

    #[test]
    fn test_single_hit_is_likely_but_not_spam() {
        let report = engine(&["bonus"]).analyze("Your B0NUS is here").unwrap();
        assert_eq!(report.score, 1);
        assert_eq!(report.severity, Severity::Likely);
        assert!(!report.is_spam);
    }

    #[test]
    fn test_blank_text_is_not_spam() {
        let report = engine(&["free"]).analyze("   ").unwrap();
        assert!(report.matches.is_empty());
        assert_eq!(report.severity, Severity::NotSpam);
        assert!(!report.is_spam);
    }

    #[test]
    fn test_engine_name() {
        assert_eq!(engine(&["free"]).name(), "keyword");
    }
}
