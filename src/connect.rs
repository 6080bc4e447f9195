//! Automatic topology inference between typed blocks.
//!
//! Edges are derived state: [`auto_connect`] rebuilds the whole edge list from the node
//! list every time node membership changes. The result depends only on the node order,
//! the node types and the [`RuleSet`], so identical input always yields identical edges
//! (same ids, same order).

use crate::flow::{Edge, Node};
use crate::rules::RuleSet;
use ahash::AHashSet;
use itertools::Itertools;
use tracing::{debug, trace};

/// Accumulates edges while refusing self-loops and repeated `(source, target)` pairs.
#[derive(Default)]
struct Wiring {
    edges: Vec<Edge>,
    pairs: AHashSet<(String, String)>,
}

impl Wiring {
    fn add(&mut self, edge: Edge) {
        if edge.source == edge.target {
            return;
        }
        if self.pairs.insert((edge.source.clone(), edge.target.clone())) {
            trace!(edge = %edge.id, "auto-connect emitted edge");
            self.edges.push(edge);
        }
    }

    fn touched(&self) -> AHashSet<&str> {
        self.edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect()
    }
}

/// Orders nodes by ascending priority. Nodes of equal priority keep their input order.
pub fn sort_by_priority<'a>(nodes: &'a [Node], rules: &RuleSet) -> Vec<&'a Node> {
    nodes
        .iter()
        .sorted_by_key(|node| rules.priority(&node.block_type))
        .collect()
}

/// Derives every edge of the flow from the node types.
///
/// 1. Nodes are visited in priority order.
/// 2. A node links to the present successor type with the lowest priority (rule order
///    breaks ties). Targets are resolved by type: the first node of that type in
///    priority order, so several instances of one type share a target.
/// 3. A node without a usable rule links to the node that follows it.
/// 4. Any node still untouched by an edge, other than the last one, is chained to its
///    follower as well.
pub fn auto_connect(nodes: &[Node], rules: &RuleSet) -> Vec<Edge> {
    let sorted = sort_by_priority(nodes, rules);
    let mut wiring = Wiring::default();

    for (index, node) in sorted.iter().enumerate() {
        match rule_target(node, &sorted, rules) {
            Some(target) => wiring.add(Edge::rule(&node.id, &target.id)),
            None => {
                if let Some(next) = sorted.get(index + 1) {
                    wiring.add(Edge::fallback(&node.id, &next.id));
                }
            }
        }
    }

    let orphans: Vec<(String, String)> = {
        let touched = wiring.touched();
        sorted
            .iter()
            .tuple_windows()
            .filter(|(node, _)| !touched.contains(node.id.as_str()))
            .map(|(node, next)| (node.id.clone(), next.id.clone()))
            .collect()
    };
    for (source, target) in orphans {
        wiring.add(Edge::fallback(&source, &target));
    }

    debug!(
        nodes = nodes.len(),
        edges = wiring.edges.len(),
        "auto-connect rebuilt edges"
    );
    wiring.edges
}

/// Picks the rule-preferred successor of `node` among the other present nodes.
fn rule_target<'a>(node: &Node, sorted: &[&'a Node], rules: &RuleSet) -> Option<&'a Node> {
    rules
        .successors(&node.block_type)
        .iter()
        .filter_map(|wanted| {
            sorted
                .iter()
                .find(|candidate| candidate.block_type == *wanted && candidate.id != node.id)
                .copied()
        })
        .min_by_key(|candidate| rules.priority(&candidate.block_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::flow::Position;

    fn node(id: &str, block_type: BlockType) -> Node {
        Node {
            id: id.to_string(),
            label: block_type.default_label(),
            block_type,
            content: String::new(),
            position: Position::default(),
        }
    }

    fn pairs(edges: &[Edge]) -> Vec<(&str, &str)> {
        edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    #[test]
    fn single_node_has_no_edges() {
        let nodes = vec![node("error_handling-1", BlockType::ErrorHandling)];
        assert!(auto_connect(&nodes, &RuleSet::standard()).is_empty());
    }

    #[test]
    fn lowest_priority_candidate_wins_over_rule_order() {
        // context_setting lists background_info before output_format; both present,
        // background_info has the lower priority value.
        let nodes = vec![
            node("output_format-1", BlockType::OutputFormat),
            node("background_info-2", BlockType::BackgroundInfo),
            node("context_setting-3", BlockType::ContextSetting),
        ];
        let edges = auto_connect(&nodes, &RuleSet::standard());
        assert!(pairs(&edges).contains(&("context_setting-3", "background_info-2")));
        assert!(pairs(&edges).contains(&("background_info-2", "output_format-1")));
    }

    #[test]
    fn nodes_without_rules_chain_to_their_follower() {
        let nodes = vec![
            node("custom-1", BlockType::from_tag("custom")),
            node("role_definition-2", BlockType::RoleDefinition),
            node("error_handling-3", BlockType::ErrorHandling),
        ];
        let edges = auto_connect(&nodes, &RuleSet::standard());
        // role has no present successor, error_handling is terminal, custom sorts last.
        assert_eq!(
            edges,
            vec![
                Edge::fallback("role_definition-2", "error_handling-3"),
                Edge::fallback("error_handling-3", "custom-1"),
            ]
        );
    }

    #[test]
    fn equal_priorities_keep_input_order() {
        let rules = RuleSet::empty();
        let nodes = vec![
            node("b-1", BlockType::from_tag("b")),
            node("a-2", BlockType::from_tag("a")),
        ];
        assert_eq!(auto_connect(&nodes, &rules), vec![Edge::fallback("b-1", "a-2")]);
    }
}
