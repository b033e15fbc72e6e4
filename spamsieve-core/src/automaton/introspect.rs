//! Human-readable views of an automaton's structure, used by the `links`
//! command to show how failure links were resolved.

use serde::Serialize;

use super::{Automaton, NodeId, ROOT};

const ROOT_LABEL: &str = "ROOT";

/// One row of the failure-link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeReport {
    pub node_id: NodeId,
    /// Spelling from the root to this node, or `"ROOT"`.
    pub path: String,
    pub failure_id: NodeId,
    pub failure_path: String,
    /// True when a complete variant spelling ends here.
    pub is_end: bool,
    /// Canonical keywords reported at this node, inherited ones included.
    pub outputs: Vec<String>,
}

impl Automaton {
    /// Lists every node depth-first, children in symbol order.
    pub fn describe(&self) -> Vec<NodeReport> {
        let order = self.depth_first_order();
        let mut paths = vec![String::new(); self.node_count()];
        for (id, path) in &order {
            paths[*id] = path.clone();
        }

        let label = |id: NodeId| -> String {
            if id == ROOT {
                ROOT_LABEL.to_string()
            } else {
                paths[id].clone()
            }
        };

        order
            .iter()
            .map(|&(id, _)| {
                let node = self.node(id);
                NodeReport {
                    node_id: id,
                    path: label(id),
                    failure_id: node.fail,
                    failure_path: label(node.fail),
                    is_end: node.terminal,
                    outputs: node.outputs.iter().map(|&k| self.keyword(k).to_string()).collect(),
                }
            })
            .collect()
    }

    /// Only the rows whose failure link points somewhere other than the root.
    pub fn non_trivial_links(&self) -> Vec<NodeReport> {
        self.describe()
            .into_iter()
            .filter(|r| r.node_id != ROOT && r.failure_id != ROOT)
            .collect()
    }

    fn depth_first_order(&self) -> Vec<(NodeId, String)> {
        let mut order = Vec::with_capacity(self.node_count());
        let mut stack = vec![(ROOT, String::new())];
        while let Some((id, path)) = stack.pop() {
            // Reverse so the smallest symbol is popped first.
            for (&symbol, &child) in self.node(id).children.iter().rev() {
                let mut child_path = path.clone();
                child_path.push(symbol);
                stack.push((child, child_path));
            }
            order.push((id, path));
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Automaton, ROOT};
    use crate::substitution::SubstitutionTable;
    use crate::variants::VariantLimits;

    fn plain(keywords: &[&str]) -> Automaton {
        Automaton::build(keywords.iter().copied(), &SubstitutionTable::empty(), &VariantLimits::default()).unwrap()
    }

    #[test]
    fn test_describe_lists_every_node_once() {
        let automaton = plain(&["get", "register"]);
        let rows = automaton.describe();
        assert_eq!(rows.len(), automaton.node_count());
        assert_eq!(rows[0].node_id, ROOT);
        assert_eq!(rows[0].path, "ROOT");
        assert_eq!(rows[0].failure_path, "ROOT");
        assert_eq!(rows[1].path, "g");
        assert_eq!(rows[2].path, "ge");
    }

    #[test]
    fn test_non_trivial_links_expose_embedded_keywords() {
        let automaton = plain(&["get", "register"]);
        let links = automaton.non_trivial_links();
        let reg = links.iter().find(|r| r.path == "reg").expect("'reg' should fail past the root");
        assert_eq!(reg.failure_path, "g");
        assert!(links.iter().all(|r| r.failure_path != "ROOT"));
    }

    #[test]
    fn test_outputs_and_end_flags() {
        let automaton = plain(&["day", "daily"]);
        let rows = automaton.describe();
        let day = rows.iter().find(|r| r.path == "day").unwrap();
        assert!(day.is_end);
        assert_eq!(day.outputs, vec!["day".to_string()]);
        let da = rows.iter().find(|r| r.path == "da").unwrap();
        assert!(!da.is_end);
        assert!(da.outputs.is_empty());
    }
}
