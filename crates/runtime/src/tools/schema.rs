//! Argument validation against a tool's declared input schema.
//!
//! Covers the schema subset the registry actually uses: an object with
//! named properties of primitive type and a `required` list.

use crate::model::ToolSpec;
use crate::tools::ToolError;
use serde_json::Value;

/// Validate `args` against the spec's `input_schema`.
///
/// Checks that required keys are present, that every provided key is
/// declared, and that values match their declared primitive type.
pub fn validate_args(spec: &ToolSpec, args: &Value) -> Result<(), ToolError> {
    let Some(args) = args.as_object() else {
        return Err(ToolError::InvalidArguments(format!(
            "{}: arguments must be an object",
            spec.name
        )));
    };

    let schema = &spec.input_schema;
    let properties = schema.get("properties").and_then(Value::as_object);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(key) {
                return Err(ToolError::InvalidArguments(format!(
                    "{}: missing required parameter '{key}'",
                    spec.name
                )));
            }
        }
    }

    for (key, value) in args {
        let Some(declared) = properties.and_then(|p| p.get(key)) else {
            return Err(ToolError::InvalidArguments(format!(
                "{}: unknown parameter '{key}'",
                spec.name
            )));
        };
        if let Some(expected) = declared.get("type").and_then(Value::as_str) {
            if !type_matches(expected, value) {
                return Err(ToolError::InvalidArguments(format!(
                    "{}: parameter '{key}' must be of type {expected}",
                    spec.name
                )));
            }
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        // Unknown declarations don't constrain the value.
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;
    use serde_json::json;

    fn spec(name: &str) -> ToolSpec {
        ToolRegistry::notes().get(name).unwrap().clone()
    }

    #[test]
    fn accepts_well_formed_arguments() {
        let result = validate_args(
            &spec("CreateNote"),
            &json!({"note_id": "note4", "content": "Water the plants"}),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_missing_required_key() {
        let err = validate_args(&spec("ReadNote"), &json!({})).unwrap_err();
        assert!(err.to_string().contains("missing required parameter 'note_id'"));
    }

    #[test]
    fn rejects_wrong_primitive_type() {
        let err = validate_args(&spec("ReadNote"), &json!({"note_id": 7})).unwrap_err();
        assert!(err.to_string().contains("must be of type string"));
    }

    #[test]
    fn rejects_undeclared_key() {
        let err =
            validate_args(&spec("ListNotes"), &json!({"note_id": "note1"})).unwrap_err();
        assert!(err.to_string().contains("unknown parameter 'note_id'"));
    }

    #[test]
    fn rejects_non_object_arguments() {
        let err = validate_args(&spec("ReadNote"), &json!("note1")).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn empty_object_is_fine_when_nothing_required() {
        assert!(validate_args(&spec("ListNotes"), &json!({})).is_ok());
    }
}
