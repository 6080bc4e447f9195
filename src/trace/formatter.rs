use crate::connect::sort_by_priority;
use crate::flow::{EdgeKind, FlowData};
use crate::rules::{RuleSet, UNRANKED_PRIORITY};
use std::fmt::Write;

/// Formats a wired flow into a human-readable listing for debugging.
pub struct FlowFormatter<'a> {
    rules: &'a RuleSet,
}

impl<'a> FlowFormatter<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Lists nodes in priority order, then every edge with how it was created.
    pub fn format(&self, flow: &FlowData) -> String {
        let mut output = String::new();
        writeln!(
            &mut output,
            "======== FLOW: {} nodes, {} edges ========",
            flow.nodes.len(),
            flow.edges.len()
        )
        .unwrap();

        writeln!(&mut output, "\n--- NODES (priority order) ---").unwrap();
        for node in sort_by_priority(&flow.nodes, self.rules) {
            let priority = match self.rules.priority(&node.block_type) {
                UNRANKED_PRIORITY => "-".to_string(),
                p => p.to_string(),
            };
            let status = if node.content.trim().is_empty() {
                "empty"
            } else {
                "filled"
            };
            writeln!(
                &mut output,
                "{:>3}  {:<28} {:<24} [{}]",
                priority, node.id, node.label, status
            )
            .unwrap();
        }

        writeln!(&mut output, "\n--- EDGES ---").unwrap();
        for edge in &flow.edges {
            let kind = match edge.kind() {
                EdgeKind::Rule => "rule",
                EdgeKind::Fallback => "fallback",
                EdgeKind::Manual => "manual",
            };
            writeln!(
                &mut output,
                "{:<9} {} -> {}",
                kind, edge.source, edge.target
            )
            .unwrap();
        }

        writeln!(&mut output, "\n================ END OF FLOW ================").unwrap();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::connect::auto_connect;
    use crate::flow::{Node, Position};

    #[test]
    fn lists_edges_with_their_kind() {
        let rules = RuleSet::standard();
        let nodes: Vec<Node> = [
            ("role_definition-1", BlockType::RoleDefinition),
            ("context_setting-2", BlockType::ContextSetting),
        ]
        .into_iter()
        .map(|(id, block_type)| Node {
            id: id.to_string(),
            label: rules.display_label(&block_type),
            block_type,
            content: String::new(),
            position: Position::default(),
        })
        .collect();
        let edges = auto_connect(&nodes, &rules);
        let text = FlowFormatter::new(&rules).format(&FlowData::new(nodes, edges));

        assert!(text.contains("rule      role_definition-1 -> context_setting-2"));
        assert!(text.contains("[empty]"));
    }
}
