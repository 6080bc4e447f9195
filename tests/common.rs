//! Common test utilities for building flows and engines.
use promptloom::prelude::*;

/// Builds an engine by adding each block in order and filling in its content.
///
/// Returns the engine together with the ids of the created nodes.
#[allow(dead_code)]
pub fn engine_with(blocks: &[(BlockType, &str)]) -> (Engine, Vec<String>) {
    let mut engine = Engine::new();
    let mut ids = Vec::new();
    for (block_type, content) in blocks {
        let id = engine.add_node(block_type.clone(), None);
        if !content.is_empty() {
            engine
                .update_node_data(&id, NodeDataPatch::content(content))
                .expect("node was just added");
        }
        ids.push(id);
    }
    (engine, ids)
}

/// Creates a detached node with the standard display label for its type.
#[allow(dead_code)]
pub fn node(id: &str, block_type: BlockType, content: &str) -> Node {
    Node {
        id: id.to_string(),
        label: RuleSet::standard().display_label(&block_type),
        block_type,
        content: content.to_string(),
        position: Position::default(),
    }
}

/// The `(source, target)` pairs of a list of edges, in order.
#[allow(dead_code)]
pub fn pairs(edges: &[Edge]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect()
}

/// A small tutoring prompt: role, context and output format with content.
#[allow(dead_code)]
pub fn tutoring_blocks() -> Vec<(BlockType, &'static str)> {
    vec![
        (BlockType::RoleDefinition, "You are a patient math tutor."),
        (
            BlockType::ContextSetting,
            "The user is a high-school student preparing for an exam.",
        ),
        (BlockType::OutputFormat, "Answer in numbered steps."),
    ]
}
