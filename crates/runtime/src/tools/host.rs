//! Tool host trait.

use crate::model::{ToolCall, ToolSpec};
use crate::tools::ToolError;
use std::future::Future;

/// Trait for tool execution hosts.
///
/// Implementations expose the registry's specifications and execute
/// tool calls. This is the boundary between the model loop and side
/// effects; the executor returns the backing service's text verbatim
/// and performs no interpretation of it.
pub trait ToolHost: Send + Sync {
    /// The tool specifications advertised to the model.
    fn specs(&self) -> &[ToolSpec];

    /// Execute one tool call.
    fn execute(&self, call: &ToolCall) -> impl Future<Output = Result<String, ToolError>> + Send;
}
