//! `headless.rs`
//! Convenience wrappers for using core engines in headless mode (non-UI).
//! Provides a helper for a full, one-shot analysis of a string.

use anyhow::Result;

use crate::config::DetectorConfig;
use crate::engine::{DetectionEngine, DetectionReport};
use crate::engines::heuristic_engine::HeuristicEngine;
use crate::engines::keyword_engine::KeywordEngine;

/// Selects which detection engine to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    #[default]
    Keyword,
    Heuristic,
}

impl EngineKind {
    /// Instantiates the selected engine behind the `DetectionEngine` trait.
    pub fn build(self, config: &DetectorConfig) -> Result<Box<dyn DetectionEngine>> {
        let engine: Box<dyn DetectionEngine> = match self {
            EngineKind::Keyword => Box::new(KeywordEngine::new(config)?),
            EngineKind::Heuristic => Box::new(HeuristicEngine::new(&config.heuristics)?),
        };
        Ok(engine)
    }
}

/// Builds the selected engine from `config` and analyses `text` once.
///
/// The keyword automaton is served from the process-wide cache, so repeated
/// calls with the same configuration do not rebuild it.
pub fn headless_analyze(config: &DetectorConfig, text: &str, kind: EngineKind) -> Result<DetectionReport> {
    kind.build(config)?.analyze(text)
}
