//! Streaming text through a resolved [`Automaton`].
//!
//! A scan never mutates the automaton. All per-scan state lives in a
//! [`ScanCursor`] on the caller's stack and in the [`MatchResult`] it fills,
//! so scans are reentrant and may run concurrently against one shared
//! automaton.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Automaton, NodeId, ROOT};
use crate::normalize::{canonicalize, fold_chars};

/// Occurrence counts per canonical keyword for a single scanned text.
///
/// Keywords that did not occur are absent, never present with a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchResult {
    counts: BTreeMap<String, usize>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrences of `keyword` (matched case-insensitively); zero when absent.
    pub fn count(&self, keyword: &str) -> usize {
        match self.counts.get(keyword) {
            Some(&n) => n,
            None => self.counts.get(&canonicalize(keyword)).copied().unwrap_or(0),
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.count(keyword) > 0
    }

    /// Sum of all occurrence counts: the "spam weight" of the text.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct keywords that occurred.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub(crate) fn record(&mut self, keyword: &str) {
        match self.counts.get_mut(keyword) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(keyword.to_string(), 1);
            }
        }
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = (&'a String, &'a usize);
    type IntoIter = std::collections::btree_map::Iter<'a, String, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// The position of one in-progress scan.
///
/// Feed it one already-folded symbol at a time with [`ScanCursor::step`], or
/// whole chunks of raw text with [`ScanCursor::feed`]. Chunks may split
/// anywhere between characters; matches spanning chunk boundaries are still
/// found. A caller that wants to stop early simply stops feeding.
#[derive(Debug, Clone)]
pub struct ScanCursor<'a> {
    automaton: &'a Automaton,
    state: NodeId,
}

impl<'a> ScanCursor<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            state: ROOT,
        }
    }

    /// Advances on a single case-folded symbol and returns the canonical
    /// keywords whose match ends at this symbol.
    pub fn step(&mut self, symbol: char) -> impl Iterator<Item = &'a str> + 'a {
        let automaton = self.automaton;
        self.state = automaton.next_state(self.state, symbol);
        automaton
            .node(self.state)
            .outputs
            .iter()
            .map(move |&id| automaton.keyword(id))
    }

    /// Case-folds `text` and advances over it, adding every match to `result`.
    pub fn feed(&mut self, text: &str, result: &mut MatchResult) {
        for symbol in fold_chars(text) {
            for keyword in self.step(symbol) {
                result.record(keyword);
            }
        }
    }

    /// Returns to the initial state.
    pub fn reset(&mut self) {
        self.state = ROOT;
    }

    pub fn is_at_root(&self) -> bool {
        self.state == ROOT
    }
}

impl Automaton {
    /// Counts every (possibly overlapping) occurrence of every keyword in `text`.
    ///
    /// `text` is case-folded first. An empty text yields an empty result.
    pub fn scan(&self, text: &str) -> MatchResult {
        let mut result = MatchResult::new();
        self.cursor().feed(text, &mut result);
        result
    }

    /// Lists every detected keyword in detection order, repeats included.
    pub fn find_all(&self, text: &str) -> Vec<&str> {
        let mut cursor = self.cursor();
        let mut found = Vec::new();
        for symbol in fold_chars(text) {
            found.extend(cursor.step(symbol));
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitution::SubstitutionTable;
    use crate::variants::VariantLimits;

    fn plain(keywords: &[&str]) -> Automaton {
        Automaton::build(keywords.iter().copied(), &SubstitutionTable::empty(), &VariantLimits::default()).unwrap()
    }

    #[test]
    fn test_overlapping_occurrences_are_counted() {
        let automaton = plain(&["aa"]);
        assert_eq!(automaton.scan("aaa").count("aa"), 2);
        assert_eq!(automaton.scan("aaaa").count("aa"), 3);
    }

    #[test]
    fn test_suffix_keyword_found_inside_longer_keyword() {
        let automaton = plain(&["free", "ee"]);
        let result = automaton.scan("free");
        assert_eq!(result.count("free"), 1);
        assert_eq!(result.count("ee"), 1);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let automaton = plain(&["winner"]);
        assert_eq!(automaton.scan("WINNER"), automaton.scan("winner"));
        assert_eq!(automaton.scan("WiNnEr").count("winner"), 1);
    }

    #[test]
    fn test_empty_text_gives_empty_result() {
        let automaton = plain(&["free", "win"]);
        let result = automaton.scan("");
        assert!(result.is_empty());
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_absent_keywords_are_not_reported() {
        let automaton = plain(&["free", "win"]);
        let result = automaton.scan("free stuff");
        assert_eq!(result.len(), 1);
        assert!(!result.iter().any(|(k, _)| k == "win"));
        assert_eq!(result.count("win"), 0);
    }

    #[test]
    fn test_mismatch_falls_back_through_failure_links() {
        let automaton = plain(&["he", "she", "his", "hers"]);
        let result = automaton.scan("ushers");
        assert_eq!(result.count("she"), 1);
        assert_eq!(result.count("he"), 1);
        assert_eq!(result.count("hers"), 1);
        assert_eq!(result.count("his"), 0);
    }

    #[test]
    fn test_find_all_preserves_detection_order() {
        let automaton = plain(&["win", "winner", "in"]);
        assert_eq!(automaton.find_all("Winner"), vec!["win", "in", "winner"]);
    }

    #[test]
    fn test_cursor_matches_across_chunk_boundaries() {
        let automaton = plain(&["claim"]);
        let mut cursor = automaton.cursor();
        let mut result = MatchResult::new();
        cursor.feed("please cl", &mut result);
        assert!(result.is_empty());
        assert!(!cursor.is_at_root());
        cursor.feed("AIM now", &mut result);
        assert_eq!(result.count("claim"), 1);

        cursor.reset();
        assert!(cursor.is_at_root());
    }

    #[test]
    fn test_count_lookup_is_case_insensitive() {
        let automaton = plain(&["free"]);
        let result = automaton.scan("free");
        assert_eq!(result.count("FREE"), 1);
    }

    #[test]
    fn test_multibyte_text_is_scanned_per_character() {
        let automaton = plain(&["café"]);
        assert_eq!(automaton.scan("Un CAFÉ gratuit, café!").count("café"), 2);
    }
}
