//! # Promptloom - Instruction Graph Engine
//!
//! **Promptloom** turns a set of typed instruction blocks (role, context, style, format,
//! logic, ...) into a wired directed graph and compiles that graph into a structured
//! prompt with three parts: system, human and assistant.
//!
//! ## Core Workflow
//!
//! The engine keeps the graph, not the UI. A host application forwards user actions to
//! an [`Engine`](engine::Engine) and renders whatever state it reports back:
//!
//! 1.  **Mutate**: `add_node`, `delete_node`, `update_node_data`, `connect`, ... each run to
//!     completion and leave the graph consistent.
//! 2.  **Auto-connect**: whenever node membership changes, every edge is rebuilt from the
//!     block types using the priority table and connection rules of a [`RuleSet`](rules::RuleSet).
//! 3.  **Compile**: the [`PromptCompiler`](compiler::PromptCompiler) buckets block content by
//!     category, narrates the paths through the graph and produces a
//!     [`PreviewDocument`](compiler::PreviewDocument).
//! 4.  **Undo/Redo**: every committed mutation is recorded in a bounded
//!     [`History`](history::History) of full snapshots.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptloom::prelude::*;
//!
//! let mut engine = Engine::new();
//!
//! let role = engine.add_node(BlockType::RoleDefinition, None);
//! let context = engine.add_node(BlockType::ContextSetting, None);
//! let format = engine.add_node(BlockType::OutputFormat, None);
//!
//! engine.update_node_data(&role, NodeDataPatch::content("You are a patient math tutor."))?;
//! engine.update_node_data(&context, NodeDataPatch::content("The user is preparing for an exam."))?;
//! engine.update_node_data(&format, NodeDataPatch::content("Answer in numbered steps."))?;
//!
//! println!("{}", engine.preview().render());
//!
//! engine.undo();
//! assert!(engine.can_redo());
//! # Ok::<(), GraphError>(())
//! ```

pub mod block;
pub mod compiler;
pub mod connect;
pub mod engine;
pub mod error;
pub mod flow;
pub mod history;
pub mod prelude;
pub mod rules;
pub mod trace;
