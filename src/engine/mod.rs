//! The graph store: owns the live nodes and edges and exposes the mutation API.
//!
//! Every committed mutation follows the same sequence: build the new node list, re-run
//! auto-connect when node membership changed, record the result in the history and
//! recompile the preview. Undo and redo restore stored snapshots verbatim and only
//! recompile.

use crate::compiler::{PreviewDocument, PromptCompiler};
use crate::flow::{Edge, FlowData, Node, NodeId, Session};
use crate::history::History;
use crate::rules::RuleSet;
use tracing::debug;

mod builder;
mod mutation;

pub use builder::{EngineBuilder, EngineConfig};
pub use mutation::NodeDataPatch;

pub struct Engine {
    rules: RuleSet,
    config: EngineConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    history: History,
    preview: PreviewDocument,
    selected: Option<NodeId>,
    next_ordinal: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An empty engine using the standard rule set.
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn assemble(
        rules: RuleSet,
        config: EngineConfig,
        flow: FlowData,
        history: History,
        next_ordinal: u64,
    ) -> Self {
        let mut engine = Self {
            rules,
            config,
            nodes: flow.nodes,
            edges: flow.edges,
            history,
            preview: PreviewDocument::default(),
            selected: None,
            next_ordinal: next_ordinal.max(1),
        };
        engine.reserve_ids();
        engine.refresh_preview();
        engine
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn preview(&self) -> &PreviewDocument {
        &self.preview
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(state) = self.history.undo().cloned() else {
            return false;
        };
        debug!(cursor = self.history.cursor(), "undo");
        self.restore(state);
        true
    }

    /// Re-applies the next snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(state) = self.history.redo().cloned() else {
            return false;
        };
        debug!(cursor = self.history.cursor(), "redo");
        self.restore(state);
        true
    }

    /// The current `{nodes, edges}` for persistence. Importing it back yields the same graph.
    pub fn export_flow_data(&self) -> FlowData {
        FlowData::new(self.nodes.clone(), self.edges.clone())
    }

    /// Captures flow, history and id counter for binary persistence.
    pub fn session(&self) -> Session {
        Session::new(self.export_flow_data(), self.history.clone(), self.next_ordinal)
    }

    fn restore(&mut self, state: FlowData) {
        self.nodes = state.nodes;
        self.edges = state.edges;
        self.drop_stale_selection();
        self.refresh_preview();
    }

    /// Installs a new graph as the result of a committed mutation.
    fn commit(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        self.nodes = nodes;
        self.edges = edges;
        let snapshot = self.export_flow_data();
        self.history.record(snapshot);
        self.drop_stale_selection();
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.preview = PromptCompiler::new(&self.rules)
            .with_placeholder(&self.config.placeholder)
            .compile(&self.nodes, &self.edges);
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.node(id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Moves the id counter past every `<tag>-<n>` id in the live graph or the history,
    /// so a redo can never resurrect an id that was handed out again.
    fn reserve_ids(&mut self) {
        let highest = self
            .nodes
            .iter()
            .chain(self.history.entries().iter().flat_map(|s| s.nodes.iter()))
            .filter_map(|n| n.id.rsplit_once('-'))
            .filter_map(|(_, ordinal)| ordinal.parse::<u64>().ok())
            .max();
        if let Some(highest) = highest {
            self.next_ordinal = self.next_ordinal.max(highest.saturating_add(1));
        }
    }
}
