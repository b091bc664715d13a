//! Quill runtime — the tool-calling orchestration core.
//!
//! This crate wires a remote model to a note store: it advertises the
//! tool registry to the model, dispatches the tool invocations the
//! model requests, feeds results back into the transcript, and repeats
//! until the model produces a final answer.
//!
//! # Overview
//!
//! - **Session**: one conversation; owns the transcript and runs the
//!   orchestration loop with a bounded round budget.
//! - **Backend**: a trait abstracting the remote inference provider;
//!   [`AnthropicBackend`] is the shipped implementation.
//! - **ToolHost**: a trait abstracting tool execution;
//!   [`NoteToolHost`] dispatches to a [`storage::NoteStore`].
//! - **ToolRegistry**: the single shared source of tool definitions
//!   consumed by both the gateway call and dispatch validation.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{AnthropicBackend, NoteToolHost, Session};
//! use std::sync::Arc;
//! use storage::{EventLog, MemoryNoteStore};
//!
//! # async fn example() -> runtime::Result<()> {
//! let backend = AnthropicBackend::builder("sk-ant-api03-...", "claude-sonnet-4-20250514").build();
//! let host = NoteToolHost::new(Arc::new(MemoryNoteStore::new()));
//! let log = EventLog::in_memory()?;
//!
//! let mut session = Session::new(log, backend, host)?;
//! let answer = session.ask("What's on my shopping list?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod context;
mod error;
pub mod model;
mod providers;
mod session;
pub mod tools;

pub use error::{Error, Result};
pub use model::{
    Backend, Message, ModelError, ModelRequest, ModelResponse, Part, Reply, Role, ToolCall,
    ToolResult, ToolSpec, Usage,
};
pub use providers::{AnthropicBackend, AnthropicBackendBuilder};
pub use session::{DEFAULT_MAX_ROUNDS, Session};
pub use tools::{NoteToolHost, ToolError, ToolHost, ToolRegistry};
