//! Failure-link resolution: turns a [`RawTrie`] into a total automaton.
//!
//! Nodes are visited breadth-first so that, whenever a node's failure link is
//! computed, the failure target (always shallower) already has its final
//! output set. Each node then inherits that output set, which makes shorter
//! keywords that are suffixes of a longer matched path visible at the longer
//! path's node.

use std::collections::VecDeque;

use log::debug;

use super::trie::RawTrie;
use super::{Automaton, KeywordId, Node, NodeId, ROOT};

pub(crate) fn resolve(trie: RawTrie) -> Automaton {
    let RawTrie {
        mut nodes,
        keywords,
        variant_count,
    } = trie;

    nodes[ROOT].fail = ROOT;

    let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(nodes.len());
    let seeds: Vec<NodeId> = nodes[ROOT].children.values().copied().collect();
    for child in seeds {
        nodes[child].fail = ROOT;
        queue.push_back(child);
    }

    let mut non_trivial = 0usize;
    while let Some(current) = queue.pop_front() {
        let edges: Vec<(char, NodeId)> = nodes[current]
            .children
            .iter()
            .map(|(&symbol, &child)| (symbol, child))
            .collect();

        for (symbol, child) in edges {
            let fail = fallback_target(&nodes, nodes[current].fail, symbol);
            debug_assert!(nodes[fail].depth < nodes[child].depth);

            nodes[child].fail = fail;
            if fail != ROOT {
                non_trivial += 1;
            }
            if !nodes[fail].outputs.is_empty() {
                let inherited = nodes[fail].outputs.clone();
                merge_outputs(&mut nodes[child].outputs, &inherited);
            }
            queue.push_back(child);
        }
    }

    debug!(
        target: "spamsieve_core::automaton",
        "Resolved failure links for {} node(s); {} point past the root.",
        nodes.len(),
        non_trivial
    );

    Automaton::from_parts(nodes, keywords, variant_count)
}

/// Walks the failure chain from `state` to the first node with an explicit
/// `symbol` transition and returns that child, or the root when none exists.
///
/// Terminates because every failure link strictly decreases depth until the root.
fn fallback_target(nodes: &[Node], mut state: NodeId, symbol: char) -> NodeId {
    loop {
        if let Some(&next) = nodes[state].children.get(&symbol) {
            return next;
        }
        if state == ROOT {
            return ROOT;
        }
        state = nodes[state].fail;
    }
}

/// Sorted-set union of `inherited` into `own`.
fn merge_outputs(own: &mut Vec<KeywordId>, inherited: &[KeywordId]) {
    let mut merged = Vec::with_capacity(own.len() + inherited.len());
    let (mut i, mut j) = (0, 0);
    while i < own.len() && j < inherited.len() {
        match own[i].cmp(&inherited[j]) {
            std::cmp::Ordering::Less => {
                merged.push(own[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(inherited[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                merged.push(own[i]);
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&own[i..]);
    merged.extend_from_slice(&inherited[j..]);
    *own = merged;
}
