//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the promptloom crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use promptloom::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let rules = RuleSet::from_file("path/to/rules.json")?;
//! let flow = FlowData::from_file("path/to/flow.json")?;
//!
//! let engine = Engine::builder().with_rules(rules).with_flow(flow).build();
//! println!("{}", engine.preview().render());
//! # Ok(())
//! # }
//! ```

// Engine and mutation API
pub use crate::engine::{Engine, EngineBuilder, EngineConfig, NodeDataPatch};

// Pure building blocks
pub use crate::compiler::{PreviewDocument, PromptCompiler};
pub use crate::connect::auto_connect;
pub use crate::history::History;
pub use crate::rules::{BlockRule, RuleSet};

// Data model
pub use crate::block::{BlockType, Category};
pub use crate::flow::{Edge, EdgeKind, FlowData, Node, Position, Session};

// Error types
pub use crate::error::{FlowDataError, GraphError, RuleSetError, SessionError};

// Debug formatting
pub use crate::trace::FlowFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
