//! The leetspeak-aware Aho-Corasick automaton.
//!
//! Construction runs in three stages, each in its own module:
//!
//! * [`crate::variants`] expands every keyword into its substitution spellings.
//! * [`trie`] inserts every spelling into a prefix tree whose terminal nodes
//!   carry the canonical keyword they spell.
//! * [`failure`] resolves failure links breadth-first and merges output sets
//!   along failure chains.
//!
//! The resulting [`Automaton`] is immutable. Scanning ([`scanner`]) keeps its
//! position in a stack-local [`ScanCursor`], so one automaton can be shared
//! (e.g. behind an `Arc`) by any number of concurrent scans.
//!
//! License: MIT OR APACHE 2.0

pub mod failure;
pub mod introspect;
pub mod scanner;
pub mod trie;

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::errors::SpamSieveError;
use crate::normalize::canonicalize;
use crate::substitution::SubstitutionTable;
use crate::variants::{generate_variants, VariantLimits};

pub use introspect::NodeReport;
pub use scanner::{MatchResult, ScanCursor};

/// Index of a node inside an [`Automaton`].
pub type NodeId = usize;

/// Index of a canonical keyword inside an [`Automaton`].
pub type KeywordId = usize;

/// The root node. Always present, always at index zero.
pub const ROOT: NodeId = 0;

/// A single automaton state.
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    /// Explicit transitions. Ordered so that node numbering is reproducible.
    pub(crate) children: BTreeMap<char, NodeId>,
    /// Failure link. Points at `ROOT` until resolved; the root links to itself.
    pub(crate) fail: NodeId,
    /// Canonical keywords recognised here, sorted and free of duplicates.
    /// After resolution this includes everything inherited along the failure chain.
    pub(crate) outputs: Vec<KeywordId>,
    /// True when a complete variant spelling ends at this node.
    pub(crate) terminal: bool,
    pub(crate) depth: usize,
}

/// A fully resolved, read-only keyword automaton.
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<Node>,
    keywords: Vec<String>,
    variant_count: usize,
}

impl Automaton {
    /// Builds an automaton from `keywords`, expanding each through `table`.
    ///
    /// Keywords are canonicalised (trimmed and lower-cased) before expansion.
    /// Duplicate keywords are accepted and collapse into one canonical entry.
    ///
    /// Construction is all-or-nothing: the first empty keyword or keyword whose
    /// expansion exceeds `limits` aborts the build.
    pub fn build<I, S>(
        keywords: I,
        table: &SubstitutionTable,
        limits: &VariantLimits,
    ) -> Result<Self, SpamSieveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = trie::TrieBuilder::new();

        for (index, raw) in keywords.into_iter().enumerate() {
            let canonical = canonicalize(raw.as_ref());
            if canonical.is_empty() {
                warn!("Rejecting empty keyword at position {}.", index);
                return Err(SpamSieveError::EmptyKeyword);
            }

            let variants = generate_variants(&canonical, table, limits)?;
            debug!(
                target: "spamsieve_core::automaton",
                "Keyword '{}' expanded to {} variant(s).",
                canonical,
                variants.len()
            );

            let keyword_id = builder.intern_keyword(&canonical);
            for variant in &variants {
                builder.insert(variant, keyword_id);
            }
        }

        let automaton = failure::resolve(builder.finish());
        info!(
            target: "spamsieve_core::automaton",
            "Built automaton: {} keyword(s), {} variant(s), {} node(s).",
            automaton.keywords.len(),
            automaton.variant_count,
            automaton.nodes.len()
        );
        Ok(automaton)
    }

    pub(crate) fn from_parts(nodes: Vec<Node>, keywords: Vec<String>, variant_count: usize) -> Self {
        Self {
            nodes,
            keywords,
            variant_count,
        }
    }

    /// Canonical keywords in the order they were first supplied.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Number of distinct variant spellings indexed.
    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a fresh cursor positioned at the root.
    pub fn cursor(&self) -> ScanCursor<'_> {
        ScanCursor::new(self)
    }

    /// The total transition function: the state reached from `state` on `symbol`.
    ///
    /// Follows failure links until an explicit transition exists or the root
    /// is reached; the root loops to itself on any symbol it has no child for.
    pub(crate) fn next_state(&self, mut state: NodeId, symbol: char) -> NodeId {
        loop {
            if let Some(&next) = self.nodes[state].children.get(&symbol) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.nodes[state].fail;
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn keyword(&self, id: KeywordId) -> &str {
        &self.keywords[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(keywords: &[&str]) -> Automaton {
        Automaton::build(keywords.iter().copied(), &SubstitutionTable::empty(), &VariantLimits::default()).unwrap()
    }

    #[test]
    fn test_automaton_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Automaton>();
    }

    #[test]
    fn test_build_rejects_empty_keyword() {
        let err = Automaton::build(["free", "  "], &SubstitutionTable::empty(), &VariantLimits::default()).unwrap_err();
        assert!(matches!(err, SpamSieveError::EmptyKeyword));
    }

    #[test]
    fn test_build_rejects_oversized_expansion() {
        let mut table = SubstitutionTable::empty();
        for c in 'a'..='t' {
            table.insert(c, ['0', '1', '2']);
        }
        let keyword: String = ('a'..='t').collect();
        let err = Automaton::build([keyword], &table, &VariantLimits::default()).unwrap_err();
        assert!(matches!(err, SpamSieveError::VariantLimitExceeded { length: 20, .. }));
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let automaton = plain(&["Free", "free", "FREE "]);
        assert_eq!(automaton.keywords(), &["free".to_string()]);
        assert_eq!(automaton.variant_count(), 1);
        assert_eq!(automaton.node_count(), 5);
    }

    #[test]
    fn test_next_state_is_total() {
        let automaton = plain(&["he", "she"]);
        for state in 0..automaton.node_count() {
            for symbol in ['h', 'e', 's', 'x', '!'] {
                assert!(automaton.next_state(state, symbol) < automaton.node_count());
            }
        }
        assert_eq!(automaton.next_state(ROOT, 'x'), ROOT);
    }
}
