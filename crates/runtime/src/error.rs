use crate::model::ModelError;
use thiserror::Error;

/// Errors fatal to a user turn.
///
/// Failures of a single tool dispatch are not represented here; the
/// session recovers those locally by feeding an error result back to
/// the model.
#[derive(Debug, Error)]
pub enum Error {
    /// The model violated the negotiation protocol.
    #[error("malformed model response: {0}")]
    MalformedModelResponse(String),

    /// The tool-calling loop exhausted its round budget.
    #[error("tool-calling budget exceeded after {rounds} rounds")]
    LoopBudgetExceeded { rounds: usize },

    /// The remote inference call failed.
    #[error("gateway: {0}")]
    Gateway(#[from] ModelError),

    /// The backing service behind the tools is unreachable.
    #[error("backing service unavailable: {0}")]
    BackingService(String),

    /// The session event log failed.
    #[error(transparent)]
    Storage(#[from] storage::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
