//! Measuring detector accuracy against a labelled CSV dataset.
//!
//! The dataset has a header row followed by `text,label` records. Quoted
//! fields may contain commas and newlines. The last field of a record is the
//! label and every earlier field belongs to the text, so an unquoted text with
//! commas still reads as one sample. Labels `true`, `yes` and `1` (any case)
//! mean spam; anything else means not spam. Records with a single field are
//! skipped.
//!
//! License: MIT OR APACHE 2.0

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use log::{debug, info};
use serde::Serialize;

use crate::engine::DetectionEngine;
use crate::scoring::Severity;

/// One labelled row of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledSample {
    pub text: String,
    pub is_spam: bool,
}

impl LabelledSample {
    /// Builds a sample from a parsed record. Returns `None` for records
    /// without a label column.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        let fields: Vec<&str> = record.iter().collect();
        let (label, text) = fields.split_last()?;
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.join(",").trim().to_string(),
            is_spam: is_spam_label(label),
        })
    }
}

fn is_spam_label(label: &str) -> bool {
    matches!(label.trim().to_lowercase().as_str(), "true" | "yes" | "1")
}

/// Reads every sample from a CSV stream, skipping the header row.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<LabelledSample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = rdr.headers().context("Failed to read CSV header")?;
    if header.is_empty() {
        bail!("Empty CSV file: no header row");
    }
    debug!("Skipping CSV header with {} column(s).", header.len());

    let mut samples = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", index + 1))?;
        match LabelledSample::from_record(&record) {
            Some(sample) => samples.push(sample),
            None => debug!("Skipping CSV record {} without a label column.", index + 1),
        }
    }
    Ok(samples)
}

/// Reads every sample from the CSV file at `path`.
pub fn read_samples_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<LabelledSample>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open dataset {}", path.display()))?;
    read_samples(file).with_context(|| format!("Failed to read dataset {}", path.display()))
}

/// Accuracy figures for one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub correct: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Number of samples predicted at each severity.
    pub severities: BTreeMap<Severity, usize>,
}

impl EvaluationReport {
    /// Percentage of correct predictions, or `None` when nothing was tested.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(100.0 * self.correct as f64 / self.total as f64)
        }
    }
}

/// Runs `engine` over every sample and compares its binary verdict to the label.
pub fn evaluate(engine: &dyn DetectionEngine, samples: &[LabelledSample]) -> Result<EvaluationReport> {
    let mut report = EvaluationReport::default();
    for severity in Severity::ALL {
        report.severities.insert(severity, 0);
    }

    for sample in samples {
        let analysis = engine.analyze(&sample.text)?;
        *report.severities.entry(analysis.severity).or_insert(0) += 1;
        report.total += 1;
        match (analysis.is_spam, sample.is_spam) {
            (predicted, actual) if predicted == actual => report.correct += 1,
            (true, false) => report.false_positives += 1,
            _ => report.false_negatives += 1,
        }
    }

    info!(
        "Evaluated {} sample(s) with the {} engine: {} correct.",
        report.total,
        engine.name(),
        report.correct
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectorConfig;
    use crate::engines::keyword_engine::KeywordEngine;
    use std::io::Cursor;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_last_field_is_the_label() {
        let sample = LabelledSample::from_record(&record(&["Hi", " free cash", " now ", " TRUE "])).unwrap();
        assert_eq!(sample.text, "Hi, free cash, now");
        assert!(sample.is_spam);
        assert!(LabelledSample::from_record(&record(&["no label here"])).is_none());
        assert!(!LabelledSample::from_record(&record(&["hello", "false"])).unwrap().is_spam);
        assert!(LabelledSample::from_record(&record(&["hello", "Yes"])).unwrap().is_spam);
        assert!(!LabelledSample::from_record(&record(&["hello", "spam"])).unwrap().is_spam);
    }

    #[test]
    fn test_quoted_text_spanning_lines() {
        let csv = "text,spam\n\"Claim your free\ncash now\",1\n\"hi, bob\",0\nhello,0\n";
        let samples = read_samples(Cursor::new(csv)).unwrap();
        assert_eq!(
            samples,
            vec![
                LabelledSample { text: "Claim your free\ncash now".to_string(), is_spam: true },
                LabelledSample { text: "hi, bob".to_string(), is_spam: false },
                LabelledSample { text: "hello".to_string(), is_spam: false },
            ]
        );
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(read_samples(Cursor::new("")).is_err());
    }

    #[test]
    fn test_header_only_yields_no_samples() {
        let samples = read_samples(Cursor::new("text,spam\n")).unwrap();
        assert!(samples.is_empty());
        let engine = KeywordEngine::new(&DetectorConfig::with_keywords(["free"])).unwrap();
        let report = evaluate(&engine, &samples).unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(report.accuracy(), None);
    }

    #[test]
    fn test_evaluate_counts_correct_predictions() {
        let csv = "text,spam\n\
                   free cash free,1\n\
                   see you at lunch,0\n\
                   free lunch,0\n\
                   claim your prize,true\n\
                   malformed row\n";
        let samples = read_samples(Cursor::new(csv)).unwrap();
        assert_eq!(samples.len(), 4);

        let engine = KeywordEngine::new(&DetectorConfig::with_keywords(["free", "cash"])).unwrap();
        let report = evaluate(&engine, &samples).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.correct, 3);
        assert_eq!(report.false_negatives, 1);
        assert_eq!(report.false_positives, 0);
        assert_eq!(report.accuracy(), Some(75.0));
        assert_eq!(report.severities[&Severity::MostLikely], 1);
        assert_eq!(report.severities[&Severity::Likely], 1);
        assert_eq!(report.severities[&Severity::NotSpam], 2);
    }
}
