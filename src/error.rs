use thiserror::Error;

/// Reasons a manual graph mutation was rejected. A rejected mutation leaves the graph,
/// the history and the preview untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' cannot be connected to itself")]
    SelfConnection(String),

    #[error("Nodes '{source_id}' and '{target_id}' are already connected")]
    DuplicateConnection { source_id: String, target_id: String },

    #[error("Node '{0}' not found in the current flow")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found in the current flow")]
    EdgeNotFound(String),
}

/// Errors that can occur while loading a rule set.
#[derive(Error, Debug, Clone)]
pub enum RuleSetError {
    #[error("Failed to parse rule set JSON: {0}")]
    JsonParseError(String),

    #[error("Block type '{0}' is defined more than once")]
    DuplicateBlock(String),

    #[error("{0}")]
    Io(String),
}

/// Errors that can occur while importing or exporting flow data.
#[derive(Error, Debug, Clone)]
pub enum FlowDataError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to serialize flow: {0}")]
    SerializeError(String),

    #[error("{0}")]
    Io(String),
}

/// Errors from saving or loading a binary session.
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    #[error("Session serialization failed: {0}")]
    Encode(String),

    #[error("Session deserialization failed: {0}")]
    Decode(String),

    #[error("{0}")]
    Io(String),
}
