//! A `DetectionEngine` that scores text on surface features typical of spam:
//! punctuation bursts, shouting, known spam phrases, links and money amounts.
//!
//! Each indicator contributes points to a single integer score, which the
//! heuristic [`ScoringConfig`] maps onto a severity (3 / 5 / 8 by default).
//! The optional message metrics add a small information-theoretic component:
//! low character entropy and a high complexity-to-length ratio both push the
//! score up.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::automaton::Automaton;
use crate::config::HeuristicConfig;
use crate::engine::{redact_text_for_log, DetectionEngine, DetectionReport, HeuristicIndicators, MessageMetrics};
use crate::errors::SpamSieveError;
use crate::normalize::fold_chars;
use crate::scoring::ScoringConfig;
use crate::substitution::SubstitutionTable;
use crate::variants::VariantLimits;

const URL_PATTERN: &str = r"https?://\S+|www\.\S+|\S+\.(?:com|net|org|biz|info)\S*";
const DOLLAR_PATTERN: &str = r"\$\d+(?:\.\d{2})?|\d+\s*dollars";

const SPECIAL_CHAR_FLOOR: usize = 5;
const CAPS_FLOOR: usize = 3;
const INDICATOR_CAP: usize = 5;
const POINTS_PER_HIT: usize = 2;

const LOW_ENTROPY_BITS: f64 = 3.5;
const LENGTH_SCORE_CEILING: f64 = 0.7;
const REPETITION_RATIO_FLOOR: f64 = 0.5;
const LENGTH_NORMALIZER: f64 = 500.0;
const ALPHABET_SIZE: f64 = 26.0;

fn compile(name: &str, pattern: &str) -> Result<Regex, SpamSieveError> {
    RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20))
        .build()
        .map_err(|e| SpamSieveError::PatternCompilationError(name.to_string(), e))
}

#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    phrases: Automaton,
    url_regex: Regex,
    dollar_regex: Regex,
    scoring: ScoringConfig,
    message_metrics: bool,
}

impl HeuristicEngine {
    pub fn new(config: &HeuristicConfig) -> Result<Self> {
        let phrases = Automaton::build(&config.phrases, &SubstitutionTable::empty(), &VariantLimits::default())
            .context("Failed to build spam phrase automaton for HeuristicEngine")?;
        Ok(Self {
            phrases,
            url_regex: compile("url", URL_PATTERN)?,
            dollar_regex: compile("dollar", DOLLAR_PATTERN)?,
            scoring: config.scoring,
            message_metrics: config.message_metrics,
        })
    }

    /// Measures every indicator without scoring.
    pub fn indicators(&self, text: &str) -> HeuristicIndicators {
        HeuristicIndicators {
            special_chars: count_special_chars(text),
            capitalized_words: count_capitalized_words(text),
            spam_phrases: self.phrases.scan(text).len(),
            urls: self.url_regex.find_iter(text).count(),
            dollar_amounts: self.dollar_regex.find_iter(text).count(),
            message_metrics: self.message_metrics.then(|| message_metrics(text)),
        }
    }

    pub fn score(indicators: &HeuristicIndicators) -> usize {
        let mut score = 0;

        if indicators.special_chars > SPECIAL_CHAR_FLOOR {
            score += (indicators.special_chars / 2).min(INDICATOR_CAP);
        }
        if indicators.capitalized_words > CAPS_FLOOR {
            score += (indicators.capitalized_words / 2).min(INDICATOR_CAP);
        }
        score += indicators.spam_phrases * POINTS_PER_HIT;
        score += indicators.urls * POINTS_PER_HIT;
        score += indicators.dollar_amounts * POINTS_PER_HIT;

        if let Some(metrics) = &indicators.message_metrics {
            if metrics.entropy < LOW_ENTROPY_BITS {
                score += 3;
            }
            if metrics.length_score > LENGTH_SCORE_CEILING {
                score += 2;
            }
            if metrics.unique_words > 0
                && (metrics.word_count as f64 / metrics.unique_words as f64) < REPETITION_RATIO_FLOOR
            {
                score += 2;
            }
        }
        score
    }
}

impl DetectionEngine for HeuristicEngine {
    fn analyze(&self, text: &str) -> Result<DetectionReport> {
        if text.trim().is_empty() {
            return Ok(DetectionReport::new(self.name(), Default::default(), self.scoring.judge(0))
                .with_indicators(HeuristicIndicators::default()));
        }

        let indicators = self.indicators(text);
        let verdict = self.scoring.judge(Self::score(&indicators));
        debug!(
            "Heuristic scan of {}: {:?} -> score {}, {}.",
            redact_text_for_log(text),
            indicators,
            verdict.score,
            verdict.severity
        );
        let matches = self.phrases.scan(text);
        Ok(DetectionReport::new(self.name(), matches, verdict).with_indicators(indicators))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

fn count_special_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_alphanumeric() && !c.is_whitespace()).count()
}

/// Words starting with a capital count once; ALL-CAPS words longer than three
/// characters count twice more.
fn count_capitalized_words(text: &str) -> usize {
    let mut count = 0;
    for word in text.split_whitespace() {
        if word.chars().next().is_some_and(char::is_uppercase) {
            count += 1;
        }
        if word.chars().count() > 3 && word == word.to_uppercase() && word != word.to_lowercase() {
            count += 2;
        }
    }
    count
}

fn message_metrics(text: &str) -> MessageMetrics {
    let mut frequencies: HashMap<char, usize> = HashMap::new();
    for c in fold_chars(text).filter(|c| c.is_alphanumeric()) {
        *frequencies.entry(c).or_insert(0) += 1;
    }

    let total: usize = frequencies.values().sum();
    let entropy = if total == 0 {
        0.0
    } else {
        frequencies
            .values()
            .map(|&n| {
                let p = n as f64 / total as f64;
                -p * p.log2()
            })
            .sum()
    };

    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let unique_words = words.iter().copied().collect::<HashSet<&str>>().len();

    let normalized_length = (text.chars().count() as f64 / LENGTH_NORMALIZER).min(1.0);
    let char_complexity = frequencies.len() as f64 / ALPHABET_SIZE;
    let word_complexity = unique_words as f64 / words.len().max(1) as f64;
    let length_score = if normalized_length > 0.0 {
        (word_complexity + char_complexity) / (2.0 * normalized_length)
    } else {
        0.0
    };

    MessageMetrics {
        entropy,
        word_count: words.len(),
        unique_words,
        length_score,
    }
}
