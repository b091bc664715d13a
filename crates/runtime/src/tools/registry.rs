//! The tool registry: the single source of truth for tool definitions.
//!
//! Both sides of the negotiation consume the same registry value: the
//! session advertises its specs to the model, and the executor
//! validates dispatch against it. Adding a tool means touching exactly
//! one place.

use crate::model::ToolSpec;
use serde_json::json;

/// An ordered collection of tool specifications.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    specs: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new(specs: Vec<ToolSpec>) -> Self {
        Self { specs }
    }

    /// The registry for the note tools.
    pub fn notes() -> Self {
        Self::new(vec![
            ToolSpec {
                name: "ReadNote".into(),
                description: "Read a specific note by its ID.".into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "The ID of the note to read"
                        }
                    },
                    "required": ["note_id"]
                }),
            },
            ToolSpec {
                name: "CreateNote".into(),
                description: "Create a new note with the given ID and content.".into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "note_id": {
                            "type": "string",
                            "description": "The ID for the new note"
                        },
                        "content": {
                            "type": "string",
                            "description": "The content of the new note"
                        }
                    },
                    "required": ["note_id", "content"]
                }),
            },
            ToolSpec {
                name: "ListNotes".into(),
                description: "List the IDs of all stored notes.".into(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
        ])
    }

    /// All specs, in advertisement order.
    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    /// Look up a spec by tool name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_registry_contents() {
        let registry = ToolRegistry::notes();
        let names: Vec<_> = registry.specs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ReadNote", "CreateNote", "ListNotes"]);
    }

    #[test]
    fn lookup_by_name() {
        let registry = ToolRegistry::notes();
        let spec = registry.get("CreateNote").unwrap();
        assert_eq!(
            spec.input_schema["required"],
            serde_json::json!(["note_id", "content"])
        );
        assert!(registry.get("DeleteNote").is_none());
    }

    #[test]
    fn names_are_unique() {
        let registry = ToolRegistry::notes();
        let mut names: Vec<_> = registry.specs().iter().map(|s| &s.name).collect();
        names.dedup();
        assert_eq!(names.len(), registry.specs().len());
    }
}
