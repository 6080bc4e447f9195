use super::Engine;
use super::mutation::valid_edges;
use crate::compiler::DEFAULT_PLACEHOLDER;
use crate::flow::{FlowData, Session};
use crate::history::{DEFAULT_HISTORY_LIMIT, History};
use crate::rules::RuleSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Tunables of an [`Engine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of history entries, including the current state. Allows
    /// `history_limit - 1` undos.
    pub history_limit: usize,
    /// System document shown when the flow compiles to nothing.
    pub placeholder: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

enum Seed {
    Empty,
    Flow(FlowData),
    Session(Session),
}

pub struct EngineBuilder {
    rules: RuleSet,
    config: EngineConfig,
    seed: Seed,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
            config: EngineConfig::default(),
            seed: Seed::Empty,
        }
    }

    /// Replaces the standard rule tables.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.config.placeholder = placeholder.to_string();
        self
    }

    /// Starts from an existing flow, which becomes the oldest history entry. Edges that
    /// break the graph invariants are dropped, as on import.
    pub fn with_flow(mut self, flow: FlowData) -> Self {
        self.seed = Seed::Flow(flow);
        self
    }

    /// Resumes a saved session, history included. The session's history keeps the
    /// limit it was saved with. If sanitizing the flow's edges leaves it different from
    /// the history's current entry, the history restarts from the sanitized flow.
    pub fn with_session(mut self, session: Session) -> Self {
        self.seed = Seed::Session(session);
        self
    }

    pub fn build(self) -> Engine {
        let (flow, history, next_ordinal) = match self.seed {
            Seed::Empty => (
                FlowData::default(),
                History::new(FlowData::default(), self.config.history_limit),
                1,
            ),
            Seed::Flow(flow) => {
                let flow = sanitized(flow);
                let history = History::new(flow.clone(), self.config.history_limit);
                (flow, history, 1)
            }
            Seed::Session(session) => {
                let flow = sanitized(session.flow);
                let history = if session.history.current() == Some(&flow) {
                    session.history
                } else {
                    warn!("session history does not match its flow, starting a new history");
                    History::new(flow.clone(), session.history.limit())
                };
                (flow, history, session.next_ordinal)
            }
        };
        Engine::assemble(self.rules, self.config, flow, history, next_ordinal)
    }
}

fn sanitized(flow: FlowData) -> FlowData {
    let edges = valid_edges(&flow.nodes, flow.edges);
    FlowData::new(flow.nodes, edges)
}
