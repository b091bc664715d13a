//! Provider-agnostic protocol types.
//!
//! These represent the conversation exchanged with a remote model.
//! Provider-specific wire formats belong in adapter modules.

use super::errors::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A tool invocation requested by the model.
///
/// The `id` is an opaque token assigned by the provider; it is consumed
/// exactly once, to key the matching [`ToolResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// The outcome of a tool invocation, keyed by the originating call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub output: String,
    pub is_error: bool,
}

impl ToolResult {
    /// A successful result.
    pub fn success(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
            is_error: false,
        }
    }

    /// A recoverable failure, fed back so the model can adapt.
    pub fn error(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
            is_error: true,
        }
    }
}

/// A part of a message, which can be text or a tool interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Part {
    Text(String),
    ToolCall(ToolCall),
    ToolResult(ToolResult),
}

/// One turn in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    /// Create a message with a single text part.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(Role::Assistant, text)
    }

    /// Create the user turn carrying a batch of tool results.
    pub fn tool_results(results: Vec<ToolResult>) -> Self {
        Self {
            role: Role::User,
            parts: results.into_iter().map(Part::ToolResult).collect(),
        }
    }

    /// Combined text content from all text parts.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// All tool calls in this message, in order.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }
}

/// A tool definition advertised to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Everything needed for one gateway call.
#[derive(Debug, Clone)]
pub struct ModelRequest<'a> {
    pub messages: &'a [Message],
    pub tools: &'a [ToolSpec],
    pub system: Option<&'a str>,
}

/// The response from a gateway call.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: Message,
    pub usage: Usage,
}

impl ModelResponse {
    /// Classify the response for the orchestration loop.
    pub fn reply(&self) -> Reply {
        let calls: Vec<ToolCall> = self
            .message
            .tool_calls()
            .into_iter()
            .cloned()
            .collect();
        if calls.is_empty() {
            // A nominal tool-use response with no entries degenerates to
            // a final answer (possibly empty) so the loop cannot spin.
            Reply::Answer(self.message.text_content())
        } else {
            Reply::ToolUse(calls)
        }
    }
}

/// What the model asked for: a final answer, or tool invocations.
///
/// `ToolUse` is non-empty by construction; a response without tool
/// calls always classifies as `Answer`.
#[derive(Debug, Clone)]
pub enum Reply {
    Answer(String),
    ToolUse(Vec<ToolCall>),
}

/// Trait for remote inference backends.
pub trait Backend: Send + Sync {
    fn call(
        &self,
        request: ModelRequest<'_>,
    ) -> impl Future<Output = Result<ModelResponse, ModelError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(parts: Vec<Part>) -> ModelResponse {
        ModelResponse {
            message: Message {
                role: Role::Assistant,
                parts,
            },
            usage: Usage::default(),
        }
    }

    #[test]
    fn text_extraction_skips_tool_parts() {
        let msg = Message {
            role: Role::Assistant,
            parts: vec![
                Part::Text("Hello ".into()),
                Part::ToolCall(ToolCall {
                    id: "1".into(),
                    name: "ReadNote".into(),
                    input: Value::Null,
                }),
                Part::Text("world".into()),
            ],
        };
        assert_eq!(msg.text_content(), "Hello world");
    }

    #[test]
    fn tool_calls_preserve_order() {
        let msg = Message {
            role: Role::Assistant,
            parts: vec![
                Part::ToolCall(ToolCall {
                    id: "a".into(),
                    name: "CreateNote".into(),
                    input: json!({"note_id": "x", "content": "y"}),
                }),
                Part::ToolCall(ToolCall {
                    id: "b".into(),
                    name: "ReadNote".into(),
                    input: json!({"note_id": "x"}),
                }),
            ],
        };
        let calls = msg.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "CreateNote");
        assert_eq!(calls[1].name, "ReadNote");
    }

    #[test]
    fn text_response_is_an_answer() {
        match response(vec![Part::Text("done".into())]).reply() {
            Reply::Answer(text) => assert_eq!(text, "done"),
            Reply::ToolUse(_) => panic!("expected an answer"),
        }
    }

    #[test]
    fn empty_response_is_an_empty_answer() {
        match response(Vec::new()).reply() {
            Reply::Answer(text) => assert_eq!(text, ""),
            Reply::ToolUse(_) => panic!("expected an answer"),
        }
    }

    #[test]
    fn tool_use_response_carries_all_calls() {
        let resp = response(vec![
            Part::Text("Let me check".into()),
            Part::ToolCall(ToolCall {
                id: "1".into(),
                name: "ReadNote".into(),
                input: json!({"note_id": "note1"}),
            }),
        ]);
        match resp.reply() {
            Reply::ToolUse(calls) => {
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].id, "1");
            }
            Reply::Answer(_) => panic!("expected tool use"),
        }
    }
}
