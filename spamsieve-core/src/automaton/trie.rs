//! Prefix-tree construction from variant spellings.

use std::collections::HashMap;

use super::{KeywordId, Node, NodeId, ROOT};

/// The trie before failure resolution. Every failure link still points at the root.
#[derive(Debug)]
pub(crate) struct RawTrie {
    pub(crate) nodes: Vec<Node>,
    pub(crate) keywords: Vec<String>,
    pub(crate) variant_count: usize,
}

/// Incrementally inserts variant spellings, tagging each terminal node with
/// the canonical keyword the spelling belongs to.
#[derive(Debug)]
pub(crate) struct TrieBuilder {
    nodes: Vec<Node>,
    keywords: Vec<String>,
    keyword_ids: HashMap<String, KeywordId>,
}

impl TrieBuilder {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            keywords: Vec::new(),
            keyword_ids: HashMap::new(),
        }
    }

    /// Registers a canonical keyword, returning the id of an existing entry
    /// when the same keyword was registered before.
    pub(crate) fn intern_keyword(&mut self, canonical: &str) -> KeywordId {
        if let Some(&id) = self.keyword_ids.get(canonical) {
            return id;
        }
        let id = self.keywords.len();
        self.keywords.push(canonical.to_string());
        self.keyword_ids.insert(canonical.to_string(), id);
        id
    }

    /// Inserts `variant` and records `keyword` on its terminal node.
    ///
    /// Idempotent: existing children are reused and a keyword is recorded at
    /// most once per node. Different keywords sharing a spelling are all kept.
    pub(crate) fn insert(&mut self, variant: &str, keyword: KeywordId) -> NodeId {
        let mut current = ROOT;
        for symbol in variant.chars() {
            current = match self.nodes[current].children.get(&symbol) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    let depth = self.nodes[current].depth + 1;
                    self.nodes.push(Node {
                        depth,
                        ..Node::default()
                    });
                    self.nodes[current].children.insert(symbol, child);
                    child
                }
            };
        }

        let node = &mut self.nodes[current];
        node.terminal = true;
        if let Err(pos) = node.outputs.binary_search(&keyword) {
            node.outputs.insert(pos, keyword);
        }
        current
    }

    pub(crate) fn finish(self) -> RawTrie {
        let variant_count = self.nodes.iter().filter(|n| n.terminal).count();
        RawTrie {
            nodes: self.nodes,
            keywords: self.keywords,
            variant_count,
        }
    }
}
