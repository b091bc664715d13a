//! Tool registry, validation, and execution.

pub mod errors;
mod host;
mod notes;
mod registry;
pub mod schema;

pub use errors::ToolError;
pub use host::ToolHost;
pub use notes::NoteToolHost;
pub use registry::ToolRegistry;
