//! Protocol types and the backend trait for remote inference.

pub mod errors;
pub mod types;

pub use errors::ModelError;
pub use types::{
    Backend, Message, ModelRequest, ModelResponse, Part, Reply, Role, ToolCall, ToolResult,
    ToolSpec, Usage,
};
