use crate::block::BlockType;
use crate::error::FlowDataError;
use serde::{Deserialize, Serialize};
use std::fs;

pub type NodeId = String;
pub type EdgeId = String;

/// Canvas coordinates. Display-only, the engine never reads them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A typed, user-editable block of instruction content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub label: String,
    pub content: String,
    pub position: Position,
}

/// A directed link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

/// How an edge came to exist, recovered from its id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Chosen by a connection rule.
    Rule,
    /// Chained to the next node in priority order.
    Fallback,
    /// Drawn explicitly by the user.
    Manual,
}

const RULE_PREFIX: &str = "auto-";
const FALLBACK_PREFIX: &str = "auto-fallback-";
const MANUAL_PREFIX: &str = "edge-";

impl Edge {
    pub fn rule(source: &str, target: &str) -> Self {
        Self::with_prefix(RULE_PREFIX, source, target)
    }

    pub fn fallback(source: &str, target: &str) -> Self {
        Self::with_prefix(FALLBACK_PREFIX, source, target)
    }

    pub fn manual(source: &str, target: &str) -> Self {
        Self::with_prefix(MANUAL_PREFIX, source, target)
    }

    fn with_prefix(prefix: &str, source: &str, target: &str) -> Self {
        Self {
            id: format!("{}{}-{}", prefix, source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn kind(&self) -> EdgeKind {
        if self.id.starts_with(FALLBACK_PREFIX) {
            EdgeKind::Fallback
        } else if self.id.starts_with(RULE_PREFIX) {
            EdgeKind::Rule
        } else {
            EdgeKind::Manual
        }
    }

    pub fn links(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

/// The `{ nodes, edges }` structure exchanged with persistence collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowData {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl FlowData {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn from_json(json: &str) -> Result<Self, FlowDataError> {
        serde_json::from_str(json).map_err(|e| FlowDataError::JsonParseError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, FlowDataError> {
        serde_json::to_string_pretty(self).map_err(|e| FlowDataError::SerializeError(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, FlowDataError> {
        let json = fs::read_to_string(path)
            .map_err(|e| FlowDataError::Io(format!("Could not read file '{}': {}", path, e)))?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &str) -> Result<(), FlowDataError> {
        fs::write(path, self.to_json()?)
            .map_err(|e| FlowDataError::Io(format!("Could not write file '{}': {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_kind_follows_id_prefix() {
        assert_eq!(Edge::rule("a", "b").kind(), EdgeKind::Rule);
        assert_eq!(Edge::fallback("a", "b").kind(), EdgeKind::Fallback);
        assert_eq!(Edge::manual("a", "b").kind(), EdgeKind::Manual);
        assert_eq!(Edge::fallback("a", "b").id, "auto-fallback-a-b");
    }

    #[test]
    fn node_serializes_type_field() {
        let node = Node {
            id: "role_definition-1".to_string(),
            block_type: BlockType::RoleDefinition,
            label: "Role Definition".to_string(),
            content: "You are a tutor.".to_string(),
            position: Position::new(100.0, 100.0),
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "role_definition");
        assert_eq!(value["position"]["x"], 100.0);
    }
}
