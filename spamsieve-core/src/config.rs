//! Configuration management for `spamsieve-core`.
//!
//! This module defines the detector configuration: the keyword list, the
//! leetspeak substitution table, the variant cap, scoring thresholds and the
//! heuristic phrase list. It handles YAML (de)serialization and provides
//! utilities for loading, merging, and validating configurations.
//!
//! License: MIT OR Apache-2.0

use std::collections::{BTreeMap, HashSet};
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::errors::SpamSieveError;
use crate::normalize::canonicalize;
use crate::scoring::ScoringConfig;
use crate::substitution::SubstitutionTable;
use crate::variants::VariantLimits;

/// Maximum allowed length of a single keyword, in characters.
pub const MAX_KEYWORD_LENGTH: usize = 64;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "SPAMSIEVE_CONFIG";

/// Phrases the heuristic engine looks for, matched literally (no substitutions).
pub const DEFAULT_SPAM_PHRASES: &[&str] = &[
    "free money",
    "make money fast",
    "get rich",
    "buy now",
    "limited time",
    "act now",
    "click here",
    "cash bonus",
    "no credit check",
    "100% free",
    "unlimited income",
    "discount",
    "guaranteed",
    "no risk",
    "winner",
];

/// Settings for the heuristic (special characters / capitals / URLs) engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub phrases: Vec<String>,
    #[serde(deserialize_with = "crate::scoring::deserialize_heuristic_scoring")]
    pub scoring: ScoringConfig,
    /// Adds the message-length metrics (entropy, word repetition, length score).
    pub message_metrics: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_SPAM_PHRASES.iter().map(|p| p.to_string()).collect(),
            scoring: ScoringConfig::heuristic(),
            message_metrics: false,
        }
    }
}

/// Represents the top-level configuration structure for spamsieve.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Canonical keywords to index. Matched case-insensitively.
    pub keywords: Vec<String>,
    /// When merging a user file, replace the default keywords instead of extending them.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub replace_keywords: bool,
    /// Character -> stand-ins. Every key and stand-in is a single character.
    pub substitutions: BTreeMap<String, Vec<String>>,
    pub limits: VariantLimits,
    pub scoring: ScoringConfig,
    pub heuristics: HeuristicConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            replace_keywords: false,
            substitutions: SubstitutionTable::leetspeak().to_config_map(),
            limits: VariantLimits::default(),
            scoring: ScoringConfig::default(),
            heuristics: HeuristicConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Creates a configuration for `keywords` with every other setting at its default.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Loads a configuration from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading detector configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: DetectorConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} keyword(s) from file {}.", config.keywords.len(), path.display());
        Ok(config)
    }

    /// Loads the built-in configuration embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: DetectorConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default configuration")?;

        debug!("Loaded {} default keyword(s).", config.keywords.len());
        Ok(config)
    }

    /// Builds the substitution table described by `substitutions`.
    pub fn substitution_table(&self) -> Result<SubstitutionTable, SpamSieveError> {
        SubstitutionTable::from_config_map(&self.substitutions)
    }

    /// Canonical keywords, deduplicated, in first-seen order.
    pub fn canonical_keywords(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.keywords
            .iter()
            .map(|k| canonicalize(k))
            .filter(|k| seen.insert(k.clone()))
            .collect()
    }

    /// Removes keywords named in `disable` (case-insensitive).
    pub fn exclude_keywords(&mut self, disable: &[String]) {
        let disable_set: HashSet<String> = disable.iter().map(|k| canonicalize(k)).collect();
        let present: HashSet<String> = self.keywords.iter().map(|k| canonicalize(k)).collect();

        for keyword in disable_set.difference(&present) {
            warn!("Keyword '{}' in the disable list is not configured.", keyword);
        }

        let before = self.keywords.len();
        self.keywords.retain(|k| !disable_set.contains(&canonicalize(k)));
        debug!("Excluded {} keyword(s); {} remain.", before - self.keywords.len(), self.keywords.len());
    }

    /// Checks the whole configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (index, keyword) in self.keywords.iter().enumerate() {
            let canonical = canonicalize(keyword);
            if canonical.is_empty() {
                errors.push(format!("Keyword at position {} is empty.", index));
                continue;
            }
            let length = canonical.chars().count();
            if length > MAX_KEYWORD_LENGTH {
                errors.push(format!(
                    "Keyword '{}' is {} characters long; the maximum is {}.",
                    keyword, length, MAX_KEYWORD_LENGTH
                ));
            }
            if !seen.insert(canonical.clone()) {
                warn!("Duplicate keyword '{}' will be indexed once.", canonical);
            }
        }

        if let Err(e) = self.substitution_table() {
            errors.push(e.to_string());
        }

        if self.limits.max_variants_per_keyword == 0 {
            errors.push("`limits.max_variants_per_keyword` must be at least 1.".to_string());
        }

        if let Err(e) = self.scoring.validate() {
            errors.push(format!("scoring: {}", e));
        }
        if let Err(e) = self.heuristics.scoring.validate() {
            errors.push(format!("heuristics.scoring: {}", e));
        }
        for (index, phrase) in self.heuristics.phrases.iter().enumerate() {
            if phrase.trim().is_empty() {
                errors.push(format!("Heuristic phrase at position {} is empty.", index));
            }
        }

        if !errors.is_empty() {
            let full_error_message = format!("Configuration validation failed:\n{}", errors.join("\n"));
            Err(anyhow!(full_error_message))
        } else {
            Ok(())
        }
    }
}

/// Merges a user configuration over the defaults.
///
/// Keywords are appended to the defaults (or replace them when the user file
/// sets `replace_keywords`). Substitution entries are overridden per
/// character. Limits, scoring and heuristic settings come from the user file.
pub fn merge_configs(default_config: DetectorConfig, user_config: Option<DetectorConfig>) -> DetectorConfig {
    debug!("merge_configs called. Default keyword count: {}", default_config.keywords.len());

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    let keywords = if user_cfg.replace_keywords {
        debug!("User config replaces the default keywords with {} keyword(s).", user_cfg.keywords.len());
        user_cfg.keywords
    } else {
        let mut seen: HashSet<String> = default_config.keywords.iter().map(|k| canonicalize(k)).collect();
        let mut merged = default_config.keywords;
        for keyword in user_cfg.keywords {
            if seen.insert(canonicalize(&keyword)) {
                merged.push(keyword);
            }
        }
        merged
    };

    let mut substitutions = default_config.substitutions;
    for (ch, stand_ins) in user_cfg.substitutions {
        debug!("Overriding substitutions for '{}' with {:?}", ch, stand_ins);
        substitutions.insert(ch, stand_ins);
    }

    let merged = DetectorConfig {
        keywords,
        replace_keywords: false,
        substitutions,
        limits: user_cfg.limits,
        scoring: user_cfg.scoring,
        heuristics: user_cfg.heuristics,
    };
    debug!("Final keyword count after merge: {}", merged.keywords.len());
    merged
}

/// Locations searched for a user configuration, in priority order.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let candidates = vec![
        env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        dirs::config_dir().map(|p| p.join("spamsieve").join("config.yaml")),
        dirs::home_dir().map(|p| p.join(".spamsieve").join("config.yaml")),
        Some(PathBuf::from("./spamsieve.yaml")),
    ];
    candidates.into_iter().flatten().collect()
}

/// Loads the first user configuration found in [`config_candidate_paths`].
pub fn discover_user_config() -> Result<Option<DetectorConfig>> {
    match config_candidate_paths().into_iter().find(|p| p.is_file()) {
        Some(path) => {
            debug!("Found user configuration at {}", path.display());
            DetectorConfig::load_from_file(&path).map(Some)
        }
        None => {
            debug!("No user configuration found; using defaults only.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_yaml_matches_code_defaults() {
        let config = DetectorConfig::load_default().unwrap();
        let code = DetectorConfig::default();
        assert_eq!(config.substitutions, code.substitutions);
        assert_eq!(config.limits, code.limits);
        assert_eq!(config.scoring, code.scoring);
        assert_eq!(config.heuristics, code.heuristics);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_keywords_are_unique() {
        let config = DetectorConfig::load_default().unwrap();
        assert_eq!(config.canonical_keywords().len(), config.keywords.len());
        assert!(config.keywords.iter().any(|k| k == "free"));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let too_long = "x".repeat(MAX_KEYWORD_LENGTH + 1);
        let mut config = DetectorConfig::with_keywords(["free", "", too_long.as_str()]);
        config.limits.max_variants_per_keyword = 0;
        config.substitutions.insert("ab".to_string(), vec!["4".to_string()]);
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("position 1 is empty"));
        assert!(message.contains("characters long"));
        assert!(message.contains("max_variants_per_keyword"));
        assert!(message.contains("'ab'"));
    }

    #[test]
    fn test_duplicate_keywords_are_only_a_warning() {
        let config = DetectorConfig::with_keywords(["Free", "free"]);
        assert!(config.validate().is_ok());
        assert_eq!(config.canonical_keywords(), vec!["free".to_string()]);
    }

    #[test]
    fn test_exclude_keywords_is_case_insensitive() {
        let mut config = DetectorConfig::with_keywords(["free", "Win", "cash"]);
        config.exclude_keywords(&["WIN".to_string(), "missing".to_string()]);
        assert_eq!(config.keywords, vec!["free".to_string(), "cash".to_string()]);
    }

    #[test]
    fn test_merge_extends_keywords_and_overrides_substitutions() {
        let default_config = DetectorConfig::with_keywords(["free", "win"]);
        let mut user = DetectorConfig::with_keywords(["WIN", "prize"]);
        user.substitutions = BTreeMap::new();
        user.substitutions.insert("e".to_string(), vec!["e".to_string(), "€".to_string()]);

        let merged = merge_configs(default_config, Some(user));
        assert_eq!(merged.keywords, vec!["free", "win", "prize"]);
        assert_eq!(merged.substitutions["e"], vec!["e".to_string(), "€".to_string()]);
        assert!(merged.substitutions.contains_key("a"));
    }

    #[test]
    fn test_merge_can_replace_keywords() {
        let default_config = DetectorConfig::with_keywords(["free", "win"]);
        let mut user = DetectorConfig::with_keywords(["prize"]);
        user.replace_keywords = true;
        let merged = merge_configs(default_config, Some(user));
        assert_eq!(merged.keywords, vec!["prize".to_string()]);
        assert!(!merged.replace_keywords);
    }

    #[test]
    fn test_merge_without_user_config_is_identity() {
        let default_config = DetectorConfig::with_keywords(["free"]);
        assert_eq!(merge_configs(default_config.clone(), None), default_config);
    }
}
