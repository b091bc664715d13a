//! Event types for the session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The speaker of a logged conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// The kind of event that occurred during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Session started.
    SessionStart,
    /// Session ended.
    SessionEnd,
    /// A conversation turn was added to the transcript.
    Message { role: Role, content: String },
    /// The model requested a tool invocation.
    ToolCall {
        id: String,
        name: String,
        arguments: serde_json::Value,
    },
    /// A tool invocation produced a result.
    ToolResult {
        id: String,
        output: String,
        is_error: bool,
    },
}

impl EventKind {
    /// Stable name used for filtering in queries.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::SessionStart => "session_start",
            EventKind::SessionEnd => "session_end",
            EventKind::Message { .. } => "message",
            EventKind::ToolCall { .. } => "tool_call",
            EventKind::ToolResult { .. } => "tool_result",
        }
    }
}

/// An event in the session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl Event {
    pub fn new(session_id: SessionId, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn message(session_id: SessionId, role: Role, content: impl Into<String>) -> Self {
        Self::new(
            session_id,
            EventKind::Message {
                role,
                content: content.into(),
            },
        )
    }

    pub fn tool_call(
        session_id: SessionId,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self::new(
            session_id,
            EventKind::ToolCall {
                id: id.into(),
                name: name.into(),
                arguments,
            },
        )
    }

    pub fn tool_result(
        session_id: SessionId,
        id: impl Into<String>,
        output: impl Into<String>,
        is_error: bool,
    ) -> Self {
        Self::new(
            session_id,
            EventKind::ToolResult {
                id: id.into(),
                output: output.into(),
                is_error,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_display_round_trip() {
        let id = SessionId::new();
        let parsed: Uuid = id.to_string().parse().unwrap();
        assert_eq!(SessionId(parsed), id);
    }

    #[test]
    fn kind_names_match_serde_tags() {
        let event = Event::tool_call(SessionId::new(), "call_1", "ReadNote", serde_json::json!({}));
        let json = serde_json::to_string(&event.kind).unwrap();
        assert!(json.contains(r#""kind":"tool_call""#));
        assert_eq!(event.kind.name(), "tool_call");
    }
}
