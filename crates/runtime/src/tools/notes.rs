//! Note-store tool host.

use crate::model::{ToolCall, ToolSpec};
use crate::tools::{ToolError, ToolHost, ToolRegistry, schema};
use serde_json::Value;
use std::sync::Arc;
use storage::NoteStore;
use tracing::debug;

/// Tool host dispatching to a note store.
///
/// The store is a constructor-time dependency; swapping the in-memory
/// store for a persistent one never touches the orchestration logic.
pub struct NoteToolHost {
    store: Arc<dyn NoteStore>,
    registry: ToolRegistry,
}

impl NoteToolHost {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            registry: ToolRegistry::notes(),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    fn dispatch(&self, call: &ToolCall) -> Result<String, ToolError> {
        let spec = self
            .registry
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;
        schema::validate_args(spec, &call.input)?;

        debug!(tool = %call.name, id = %call.id, "dispatching tool call");

        match call.name.as_str() {
            "ReadNote" => {
                let note_id = str_arg(&call.input, "note_id")?;
                let content = self.store.read(note_id).map_err(unavailable)?;
                Ok(content.unwrap_or_else(|| "Note not found".to_string()))
            }
            "CreateNote" => {
                let note_id = str_arg(&call.input, "note_id")?;
                let content = str_arg(&call.input, "content")?;
                if self.store.create(note_id, content).map_err(unavailable)? {
                    Ok(format!("Note {note_id} created successfully"))
                } else {
                    Ok("Error: This note ID already exists".to_string())
                }
            }
            "ListNotes" => {
                let index = self.store.index().map_err(unavailable)?;
                index
                    .to_json()
                    .map_err(|e| ToolError::Failed(e.to_string()))
            }
            other => Err(ToolError::NotFound(other.to_string())),
        }
    }
}

impl ToolHost for NoteToolHost {
    fn specs(&self) -> &[ToolSpec] {
        self.registry.specs()
    }

    async fn execute(&self, call: &ToolCall) -> Result<String, ToolError> {
        self.dispatch(call)
    }
}

fn str_arg<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing required parameter '{key}'")))
}

fn unavailable(err: storage::Error) -> ToolError {
    ToolError::Unavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storage::MemoryNoteStore;

    fn host() -> NoteToolHost {
        NoteToolHost::new(Arc::new(MemoryNoteStore::seeded([(
            "note1",
            "Buy milk and eggs",
        )])))
    }

    fn call(name: &str, input: Value) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            name: name.into(),
            input,
        }
    }

    #[tokio::test]
    async fn read_note_returns_content() {
        let output = host()
            .execute(&call("ReadNote", json!({"note_id": "note1"})))
            .await
            .unwrap();
        assert_eq!(output, "Buy milk and eggs");
    }

    #[tokio::test]
    async fn read_missing_note_returns_sentinel() {
        let output = host()
            .execute(&call("ReadNote", json!({"note_id": "note9"})))
            .await
            .unwrap();
        assert_eq!(output, "Note not found");
    }

    #[tokio::test]
    async fn create_note_reports_success() {
        let output = host()
            .execute(&call(
                "CreateNote",
                json!({"note_id": "note2", "content": "Call mom on Sunday"}),
            ))
            .await
            .unwrap();
        assert_eq!(output, "Note note2 created successfully");
    }

    #[tokio::test]
    async fn create_duplicate_reports_error_text() {
        let store = Arc::new(MemoryNoteStore::seeded([("note1", "original")]));
        let host = NoteToolHost::new(store.clone());
        let output = host
            .execute(&call(
                "CreateNote",
                json!({"note_id": "note1", "content": "replacement"}),
            ))
            .await
            .unwrap();
        assert_eq!(output, "Error: This note ID already exists");
        assert_eq!(store.read("note1").unwrap().as_deref(), Some("original"));
    }

    #[tokio::test]
    async fn list_notes_returns_index_json() {
        let output = host().execute(&call("ListNotes", json!({}))).await.unwrap();
        assert_eq!(output, r#"{"note_ids":["note1"]}"#);
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let err = host()
            .execute(&call("DeleteNote", json!({"note_id": "note1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn invalid_arguments_are_rejected_before_dispatch() {
        let err = host()
            .execute(&call("ReadNote", json!({"id": "note1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn specs_come_from_the_shared_registry() {
        let host = host();
        assert_eq!(host.specs().len(), host.registry().specs().len());
    }
}
