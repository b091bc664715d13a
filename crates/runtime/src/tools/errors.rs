use thiserror::Error;

/// Errors from a single tool dispatch.
///
/// `NotFound`, `InvalidArguments`, and `Failed` are recoverable: the
/// loop encodes them as error-tagged results in the transcript so the
/// model can correct itself. `Unavailable` means the backing service
/// itself is broken and aborts the turn.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("execution failed: {0}")]
    Failed(String),

    #[error("backing service unavailable: {0}")]
    Unavailable(String),
}

impl ToolError {
    /// Whether this error must abort the turn instead of being fed
    /// back to the model.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
