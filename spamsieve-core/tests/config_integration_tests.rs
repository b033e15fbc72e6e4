// spamsieve-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use spamsieve_core::config::{self, DetectorConfig};
use spamsieve_core::{DetectionEngine, HeuristicEngine, KeywordEngine, ScoringConfig, Severity, SeverityThresholds};

#[test]
fn test_load_default_config() {
    let config = DetectorConfig::load_default().unwrap();
    assert!(!config.keywords.is_empty());
    assert!(config.keywords.iter().any(|k| k == "gcash"));
    assert_eq!(config.limits.max_variants_per_keyword, 4096);
    assert_eq!(config.substitutions["a"], vec!["a", "@", "4"]);
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
keywords:
  - jackpot
  - "Prize"
substitutions:
  "a": ["a", "4"]
  "o": ["o", "0"]
limits:
  max_variants_per_keyword: 64
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = DetectorConfig::load_from_file(file.path())?;
    assert_eq!(config.keywords, vec!["jackpot", "Prize"]);
    assert_eq!(config.substitutions.len(), 2);
    assert_eq!(config.limits.max_variants_per_keyword, 64);
    // Omitted sections fall back to their defaults.
    assert_eq!(config.scoring.spam_cutoff, 2);
    assert!(!config.heuristics.phrases.is_empty());

    let engine = KeywordEngine::new(&config)?;
    let report = engine.analyze("J4CKP0T! claim your PRIZE")?;
    assert_eq!(report.matches.count("jackpot"), 1);
    assert_eq!(report.matches.count("prize"), 1);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_substitution() -> Result<()> {
    let yaml_content = r#"
keywords: [free]
substitutions:
  "ee": ["3"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = DetectorConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_malformed_yaml() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"keywords: [free\n")?;
    let err = DetectorConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    let err = DetectorConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_merge_user_file_over_defaults() -> Result<()> {
    let yaml_content = r#"
keywords: [jackpot, FREE]
substitutions:
  "k": ["k", "c"]
scoring:
  spam_cutoff: 3
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let user = DetectorConfig::load_from_file(file.path())?;
    let defaults = DetectorConfig::load_default()?;
    let default_count = defaults.keywords.len();

    let merged = config::merge_configs(defaults, Some(user));
    assert_eq!(merged.keywords.len(), default_count + 1);
    assert_eq!(merged.keywords.last().map(String::as_str), Some("jackpot"));
    assert_eq!(merged.substitutions["k"], vec!["k", "c"]);
    assert_eq!(merged.substitutions["e"], vec!["e", "3"]);
    assert_eq!(merged.scoring.spam_cutoff, 3);
    Ok(())
}

#[test]
fn test_round_trip_through_yaml() -> Result<()> {
    let config = DetectorConfig::with_keywords(["bonus", "claim"]);
    let yaml = serde_yml::to_string(&config)?;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    let loaded = DetectorConfig::load_from_file(file.path())?;
    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_partial_heuristic_scoring_keeps_heuristic_scale() -> Result<()> {
    let yaml_content = r#"
heuristics:
  scoring:
    spam_cutoff: 6
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = DetectorConfig::load_from_file(file.path())?;
    assert_eq!(config.heuristics.scoring.thresholds, SeverityThresholds::heuristic());
    assert_eq!(config.heuristics.scoring.spam_cutoff, 6);
    // The keyword section is untouched.
    assert_eq!(config.scoring, ScoringConfig::default());

    let report = HeuristicEngine::new(&config.heuristics)?.analyze("discount now")?;
    assert_eq!(report.score, 2);
    assert_eq!(report.severity, Severity::NotSpam);
    assert!(!report.is_spam);
    Ok(())
}

#[test]
fn test_partial_heuristic_thresholds_fill_from_heuristic_defaults() -> Result<()> {
    let yaml_content = r#"
heuristics:
  scoring:
    thresholds:
      definite: 10
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = DetectorConfig::load_from_file(file.path())?;
    let scoring = config.heuristics.scoring;
    assert_eq!(scoring.thresholds.likely, 3);
    assert_eq!(scoring.thresholds.most_likely, 5);
    assert_eq!(scoring.thresholds.definite, 10);
    assert_eq!(scoring.spam_cutoff, 5);
    Ok(())
}
