use super::Engine;
use crate::block::BlockType;
use crate::connect::auto_connect;
use crate::error::GraphError;
use crate::flow::{Edge, EdgeId, FlowData, Node, NodeId, Position};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Offset applied to a duplicated node so it does not cover the original.
const DUPLICATE_OFFSET: f64 = 40.0;

/// A partial update of a node's editable data. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDataPatch {
    pub label: Option<String>,
    pub content: Option<String>,
}

impl NodeDataPatch {
    pub fn content(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            ..Self::default()
        }
    }

    pub fn label(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    fn apply(&self, node: &mut Node) -> bool {
        let mut changed = false;
        if let Some(label) = &self.label {
            changed |= node.label != *label;
            node.label = label.clone();
        }
        if let Some(content) = &self.content {
            changed |= node.content != *content;
            node.content = content.clone();
        }
        changed
    }
}

impl Engine {
    /// Adds a block of `block_type` and rewires the flow. Without a position the node is
    /// placed on a four-column grid.
    pub fn add_node(&mut self, block_type: BlockType, position: Option<Position>) -> NodeId {
        let position = position.unwrap_or_else(|| grid_position(self.nodes.len()));
        let node = Node {
            id: self.allocate_id(&block_type),
            label: self.rules.display_label(&block_type),
            block_type,
            content: String::new(),
            position,
        };
        let id = node.id.clone();
        debug!(node = %id, "adding node");

        let mut nodes = self.nodes.clone();
        nodes.push(node);
        let edges = auto_connect(&nodes, &self.rules);
        self.commit(nodes, edges);
        id
    }

    /// Removes a node and rewires the flow. Unknown ids change nothing.
    pub fn delete_node(&mut self, id: &str) -> Result<(), GraphError> {
        if self.node(id).is_none() {
            debug!(node = %id, "delete ignored, node not found");
            return Err(GraphError::NodeNotFound(id.to_string()));
        }
        let nodes: Vec<Node> = self.nodes.iter().filter(|n| n.id != id).cloned().collect();
        let edges = auto_connect(&nodes, &self.rules);
        self.commit(nodes, edges);
        Ok(())
    }

    /// Edits a node's label and/or content. Membership is unchanged, so edges are kept.
    /// A patch that changes nothing records no history entry.
    pub fn update_node_data(&mut self, id: &str, patch: NodeDataPatch) -> Result<(), GraphError> {
        self.replace_node(id, |node| patch.apply(node))
    }

    /// Commits a finished drag.
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        self.replace_node(id, |node| {
            let moved = node.position != position;
            node.position = position;
            moved
        })
    }

    /// Applies an in-progress drag delta. Not recorded in the history.
    pub fn drag_node(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Changes the selected node. Not recorded in the history.
    pub fn select_node(&mut self, id: Option<&str>) -> Result<(), GraphError> {
        match id {
            Some(id) if self.node(id).is_none() => Err(GraphError::NodeNotFound(id.to_string())),
            _ => {
                self.selected = id.map(str::to_string);
                Ok(())
            }
        }
    }

    /// Copies a node's type, label and content into a new node next to it.
    pub fn duplicate_node(&mut self, id: &str) -> Result<NodeId, GraphError> {
        let original = self
            .node(id)
            .cloned()
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        let copy = Node {
            id: self.allocate_id(&original.block_type),
            position: original.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET),
            ..original
        };
        let copy_id = copy.id.clone();

        let mut nodes = self.nodes.clone();
        nodes.push(copy);
        let edges = auto_connect(&nodes, &self.rules);
        self.commit(nodes, edges);
        Ok(copy_id)
    }

    /// Draws a manual edge. Self-loops, repeated pairs and unknown endpoints are rejected
    /// without touching the graph or the history.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId, GraphError> {
        if let Err(error) = self.validate_connection(source, target) {
            warn!(%source, %target, "connection rejected: {}", error);
            return Err(error);
        }
        let edge = Edge::manual(source, target);
        let edge_id = edge.id.clone();

        let mut edges = self.edges.clone();
        edges.push(edge);
        let nodes = self.nodes.clone();
        self.commit(nodes, edges);
        Ok(edge_id)
    }

    /// Removes one edge by id.
    pub fn disconnect(&mut self, edge_id: &str) -> Result<(), GraphError> {
        if !self.edges.iter().any(|e| e.id == edge_id) {
            warn!(edge = %edge_id, "disconnect ignored, edge not found");
            return Err(GraphError::EdgeNotFound(edge_id.to_string()));
        }
        let edges: Vec<Edge> = self.edges.iter().filter(|e| e.id != edge_id).cloned().collect();
        let nodes = self.nodes.clone();
        self.commit(nodes, edges);
        Ok(())
    }

    /// Clears the flow. Resetting an already empty flow records nothing.
    pub fn reset_flow(&mut self) {
        if self.nodes.is_empty() && self.edges.is_empty() {
            return;
        }
        self.selected = None;
        self.commit(Vec::new(), Vec::new());
    }

    /// Replaces the graph with imported data, verbatim and without auto-connect.
    ///
    /// Edges that would break the graph invariants (self-loops, repeated pairs, missing
    /// endpoints) are dropped. The import is recorded and can be undone.
    pub fn import_flow_data(&mut self, flow: FlowData) {
        let edges = valid_edges(&flow.nodes, flow.edges);
        self.commit(flow.nodes, edges);
        self.reserve_ids();
    }

    fn validate_connection(&self, source: &str, target: &str) -> Result<(), GraphError> {
        if source == target {
            return Err(GraphError::SelfConnection(source.to_string()));
        }
        for id in [source, target] {
            if self.node(id).is_none() {
                return Err(GraphError::NodeNotFound(id.to_string()));
            }
        }
        if self.edges.iter().any(|e| e.links(source, target)) {
            return Err(GraphError::DuplicateConnection {
                source_id: source.to_string(),
                target_id: target.to_string(),
            });
        }
        Ok(())
    }

    /// Applies `edit` to a copy of the node and commits it if the edit reports a change.
    fn replace_node(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Node) -> bool,
    ) -> Result<(), GraphError> {
        let Some(index) = self.nodes.iter().position(|n| n.id == id) else {
            debug!(node = %id, "edit ignored, node not found");
            return Err(GraphError::NodeNotFound(id.to_string()));
        };

        let mut nodes = self.nodes.clone();
        if !edit(&mut nodes[index]) {
            return Ok(());
        }
        let edges = self.edges.clone();
        self.commit(nodes, edges);
        Ok(())
    }

    fn allocate_id(&mut self, block_type: &BlockType) -> NodeId {
        let id = format!("{}-{}", block_type.tag(), self.next_ordinal);
        self.next_ordinal += 1;
        id
    }
}

fn grid_position(index: usize) -> Position {
    Position::new(
        100.0 + 250.0 * (index % 4) as f64,
        100.0 + 150.0 * (index / 4) as f64,
    )
}

/// Keeps the edges that satisfy the graph invariants: no self-loops, no repeated
/// `(source, target)` pairs and both endpoints present.
pub(super) fn valid_edges(nodes: &[Node], edges: Vec<Edge>) -> Vec<Edge> {
    let ids: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut pairs: AHashSet<(String, String)> = AHashSet::new();
    edges
        .into_iter()
        .filter(|edge| {
            let valid = edge.source != edge.target
                && ids.contains(edge.source.as_str())
                && ids.contains(edge.target.as_str())
                && pairs.insert((edge.source.clone(), edge.target.clone()));
            if !valid {
                warn!(edge = %edge.id, "dropping invalid edge");
            }
            valid
        })
        .collect()
}
