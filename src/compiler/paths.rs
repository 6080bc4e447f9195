use crate::flow::{Edge, Node};
use ahash::{AHashMap, AHashSet};

/// Separator between labels in a narrated flow.
pub const FLOW_ARROW: &str = " → ";

/// Enumerates label chains from every root (a node without incoming edges) to a node
/// without outgoing edges.
///
/// One visited set is shared by the whole walk. A node reached a second time, from a
/// sibling branch or from another root, is not expanded again and the branch that
/// reached it is dropped. This keeps accidental cycles finite at the cost of not
/// reporting every path through a node that several branches converge on.
pub struct PathEnumerator<'a> {
    order: &'a [Node],
    edges: &'a [Edge],
    nodes: AHashMap<&'a str, &'a Node>,
    outgoing: AHashMap<&'a str, Vec<&'a str>>,
    visited: AHashSet<&'a str>,
    paths: Vec<Vec<&'a str>>,
}

impl<'a> PathEnumerator<'a> {
    pub fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in edges {
            outgoing
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
        Self {
            order: nodes,
            edges,
            nodes: nodes.iter().map(|n| (n.id.as_str(), n)).collect(),
            outgoing,
            visited: AHashSet::new(),
            paths: Vec::new(),
        }
    }

    /// Returns each path as the list of node labels along it, roots in node order.
    pub fn enumerate(mut self) -> Vec<Vec<&'a str>> {
        let (order, edges) = (self.order, self.edges);
        let targets: AHashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
        for root in order.iter().filter(|n| !targets.contains(n.id.as_str())) {
            self.walk(root.id.as_str(), Vec::new());
        }
        self.paths
    }

    fn walk(&mut self, node_id: &'a str, mut path: Vec<&'a str>) {
        if !self.visited.insert(node_id) {
            return;
        }
        let Some(node) = self.nodes.get(node_id).copied() else {
            return;
        };
        path.push(node.label.as_str());

        match self.outgoing.get(node_id).cloned() {
            Some(targets) if !targets.is_empty() => {
                for target in targets {
                    self.walk(target, path.clone());
                }
            }
            _ => {
                if path.len() > 1 {
                    self.paths.push(path);
                }
            }
        }
    }
}

/// Convenience wrapper returning each path joined with [`FLOW_ARROW`].
pub fn flow_paths(nodes: &[Node], edges: &[Edge]) -> Vec<String> {
    PathEnumerator::new(nodes, edges)
        .enumerate()
        .into_iter()
        .map(|labels| labels.join(FLOW_ARROW))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::flow::Position;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            block_type: BlockType::from_tag("step"),
            label: id.to_uppercase(),
            content: String::new(),
            position: Position::default(),
        }
    }

    #[test]
    fn forks_produce_one_path_per_branch() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![Edge::manual("a", "b"), Edge::manual("a", "c")];
        assert_eq!(flow_paths(&nodes, &edges), vec!["A → B", "A → C"]);
    }

    #[test]
    fn converging_branches_report_the_shared_node_once() {
        // a -> c and b -> c: the second root reaches an already visited node.
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![Edge::manual("a", "c"), Edge::manual("b", "c")];
        assert_eq!(flow_paths(&nodes, &edges), vec!["A → C"]);
    }

    #[test]
    fn cycles_without_roots_yield_nothing() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![Edge::manual("a", "b"), Edge::manual("b", "a")];
        assert!(flow_paths(&nodes, &edges).is_empty());
    }

    #[test]
    fn isolated_nodes_are_not_flows() {
        let nodes = vec![node("a")];
        assert!(flow_paths(&nodes, &[]).is_empty());
    }
}
