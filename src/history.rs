//! Bounded linear undo/redo over full `{nodes, edges}` snapshots.
//!
//! The history is seeded with the state the engine starts from, and every committed
//! mutation records the state it produced. The entry under the cursor therefore always
//! equals the live graph, and the entry before it is exactly the state the last mutation
//! was applied to. Undo and redo move the cursor and hand back a stored snapshot; the
//! caller restores it verbatim without re-running auto-connect.

use crate::flow::FlowData;
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots kept unless configured otherwise. The live state is one
/// of them, so the undo depth is `limit - 1`.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<FlowData>,
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(FlowData::default(), DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Creates a history holding only `initial`. A `limit` of zero is raised to one.
    pub fn new(initial: FlowData, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Records a committed state.
    ///
    /// Entries after the cursor (a future abandoned by undo) are discarded first. When the
    /// limit is exceeded the oldest entry is dropped and the cursor stays on the newest one.
    pub fn record(&mut self, state: FlowData) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        while self.entries.len() > self.limit {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry and returns the state to restore. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&FlowData> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Steps forward one entry and returns the state to restore. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&FlowData> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&FlowData> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn entries(&self) -> &[FlowData] {
        &self.entries
    }

    /// True when the cursor addresses a stored entry and the limit is respected.
    /// Deserialized histories are checked with this before use.
    pub fn is_consistent(&self) -> bool {
        self.limit > 0 && self.cursor < self.entries.len() && self.entries.len() <= self.limit
    }
}
