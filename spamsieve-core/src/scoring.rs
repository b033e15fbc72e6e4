//! Turning raw scores into severity labels and a binary spam verdict.
//!
//! Both engines produce a non-negative integer score: the keyword engine sums
//! keyword occurrences (the "spam weight"), the heuristic engine sums its
//! indicator points. A [`ScoringConfig`] maps that score onto a [`Severity`]
//! through ascending thresholds and decides the binary verdict with a cutoff.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::automaton::MatchResult;

/// Four-level severity scale shared by every engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    NotSpam,
    Likely,
    MostLikely,
    Definite,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::NotSpam,
        Severity::Likely,
        Severity::MostLikely,
        Severity::Definite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::NotSpam => "not spam",
            Severity::Likely => "likely spam",
            Severity::MostLikely => "most likely spam",
            Severity::Definite => "definite spam",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum score for each severity above [`Severity::NotSpam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub likely: usize,
    pub most_likely: usize,
    pub definite: usize,
}

impl Default for SeverityThresholds {
    /// Keyword-weight thresholds: 0 not spam, 1-2 likely, 3-4 most likely, 5+ definite.
    fn default() -> Self {
        Self {
            likely: 1,
            most_likely: 3,
            definite: 5,
        }
    }
}

impl SeverityThresholds {
    /// Thresholds for the heuristic engine's indicator score (3 / 5 / 8).
    pub fn heuristic() -> Self {
        Self {
            likely: 3,
            most_likely: 5,
            definite: 8,
        }
    }

    pub fn classify(&self, score: usize) -> Severity {
        if score >= self.definite {
            Severity::Definite
        } else if score >= self.most_likely {
            Severity::MostLikely
        } else if score >= self.likely {
            Severity::Likely
        } else {
            Severity::NotSpam
        }
    }

    /// Checks that the thresholds are ascending and that a zero score is never spam.
    pub fn validate(&self) -> Result<(), String> {
        if self.likely == 0 {
            return Err("`likely` threshold must be at least 1".to_string());
        }
        if !(self.likely <= self.most_likely && self.most_likely <= self.definite) {
            return Err(format!(
                "thresholds must be ascending (likely {} <= most_likely {} <= definite {})",
                self.likely, self.most_likely, self.definite
            ));
        }
        Ok(())
    }
}

/// Severity thresholds plus the cutoff for the binary verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: SeverityThresholds,
    /// A score at or above this value is reported as spam.
    pub spam_cutoff: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: SeverityThresholds::default(),
            spam_cutoff: 2,
        }
    }
}

impl ScoringConfig {
    /// Heuristic scoring: spam from the "most likely" level (score 5) upwards.
    pub fn heuristic() -> Self {
        let thresholds = SeverityThresholds::heuristic();
        Self {
            thresholds,
            spam_cutoff: thresholds.most_likely,
        }
    }

    pub fn is_spam(&self, score: usize) -> bool {
        score >= self.spam_cutoff
    }

    pub fn judge(&self, score: usize) -> Verdict {
        Verdict {
            score,
            severity: self.thresholds.classify(score),
            is_spam: self.is_spam(score),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()?;
        if self.spam_cutoff == 0 {
            return Err("`spam_cutoff` must be at least 1".to_string());
        }
        Ok(())
    }
}

/// A scoring section as written in a file, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScoringOverrides {
    thresholds: ThresholdOverrides,
    spam_cutoff: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThresholdOverrides {
    likely: Option<usize>,
    most_likely: Option<usize>,
    definite: Option<usize>,
}

impl ScoringOverrides {
    fn apply(self, base: ScoringConfig) -> ScoringConfig {
        let t = self.thresholds;
        ScoringConfig {
            thresholds: SeverityThresholds {
                likely: t.likely.unwrap_or(base.thresholds.likely),
                most_likely: t.most_likely.unwrap_or(base.thresholds.most_likely),
                definite: t.definite.unwrap_or(base.thresholds.definite),
            },
            spam_cutoff: self.spam_cutoff.unwrap_or(base.spam_cutoff),
        }
    }
}

/// Deserializes a heuristic scoring section, filling omitted fields from
/// [`ScoringConfig::heuristic`] rather than the keyword defaults.
pub(crate) fn deserialize_heuristic_scoring<'de, D>(deserializer: D) -> Result<ScoringConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(ScoringOverrides::deserialize(deserializer)?.apply(ScoringConfig::heuristic()))
}

/// The scored outcome for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub score: usize,
    pub severity: Severity,
    pub is_spam: bool,
}

/// Sum of all keyword occurrences in `matches`.
pub fn spam_weight(matches: &MatchResult) -> usize {
    matches.total()
}
