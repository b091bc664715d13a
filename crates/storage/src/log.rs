//! SQLite-backed session event log.
//!
//! Append-only audit trail of everything that happens during a session:
//! conversation turns, tool invocations, and lifecycle markers.

use crate::{Event, Result, SessionId};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Mutex;
use uuid::Uuid;

/// Summary of one session, for listing.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub message_count: usize,
}

/// Append-only event log.
pub struct EventLog {
    conn: Mutex<Connection>,
}

impl EventLog {
    /// Open or create an event log at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_conn(Connection::open(path)?)
    }

    /// Create an in-memory event log (useful for testing).
    pub fn in_memory() -> Result<Self> {
        Self::from_conn(Connection::open_in_memory()?)
    }

    fn from_conn(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                kind TEXT NOT NULL,
                data TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_events_session
                ON events(session_id, timestamp);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append an event.
    pub fn append(&self, event: &Event) -> Result<()> {
        self.lock().execute(
            "INSERT INTO events (id, session_id, timestamp, kind, data)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id.to_string(),
                event.session_id.to_string(),
                event.timestamp.to_rfc3339(),
                event.kind.name(),
                serde_json::to_string(&event.kind)?,
            ],
        )?;
        Ok(())
    }

    /// All events for a session, in order.
    pub fn load_session(&self, session_id: SessionId) -> Result<Vec<Event>> {
        self.load_events(session_id, None)
    }

    /// Events for a session, optionally filtered by kind name.
    pub fn load_events(
        &self,
        session_id: SessionId,
        kind_filter: Option<&str>,
    ) -> Result<Vec<Event>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, data FROM events
             WHERE session_id = ?1 AND (?2 IS NULL OR kind = ?2)
             ORDER BY timestamp, rowid",
        )?;

        let rows = stmt.query_map(params![session_id.to_string(), kind_filter], |row| {
            let id: String = row.get(0)?;
            let timestamp: String = row.get(1)?;
            let data: String = row.get(2)?;
            Ok((id, timestamp, data))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp, data) = row?;
            let Some(event) = decode_event(&id, session_id, &timestamp, &data) else {
                continue;
            };
            events.push(event);
        }
        Ok(events)
    }

    /// Summaries of all sessions, most recent first.
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT session_id,
                    MIN(timestamp),
                    MAX(CASE WHEN kind = 'session_end' THEN timestamp END),
                    SUM(CASE WHEN kind = 'message' THEN 1 ELSE 0 END)
             FROM events
             GROUP BY session_id
             ORDER BY MIN(timestamp) DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let started: String = row.get(1)?;
            let ended: Option<String> = row.get(2)?;
            let messages: i64 = row.get(3)?;
            Ok((id, started, ended, messages))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (id, started, ended, messages) = row?;
            let Ok(uuid) = id.parse::<Uuid>() else {
                continue;
            };
            let Ok(started_at) = started.parse::<DateTime<Utc>>() else {
                continue;
            };
            summaries.push(SessionSummary {
                id: SessionId(uuid),
                started_at,
                ended_at: ended.and_then(|t| t.parse().ok()),
                message_count: messages.max(0) as usize,
            });
        }
        Ok(summaries)
    }
}

fn decode_event(id: &str, session_id: SessionId, timestamp: &str, data: &str) -> Option<Event> {
    Some(Event {
        id: id.parse().ok()?,
        session_id,
        timestamp: timestamp.parse().ok()?,
        kind: serde_json::from_str(data).ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventKind, Role};

    #[test]
    fn append_and_load_in_order() {
        let log = EventLog::in_memory().unwrap();
        let session = SessionId::new();

        log.append(&Event::new(session, EventKind::SessionStart))
            .unwrap();
        log.append(&Event::message(session, Role::User, "hello"))
            .unwrap();
        log.append(&Event::message(session, Role::Assistant, "hi"))
            .unwrap();

        let events = log.load_session(session).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0].kind, EventKind::SessionStart));
        assert!(matches!(
            &events[1].kind,
            EventKind::Message { role: Role::User, content } if content == "hello"
        ));
    }

    #[test]
    fn kind_filter_selects_tool_events() {
        let log = EventLog::in_memory().unwrap();
        let session = SessionId::new();

        log.append(&Event::message(session, Role::User, "q")).unwrap();
        log.append(&Event::tool_call(
            session,
            "call_1",
            "ReadNote",
            serde_json::json!({"note_id": "note1"}),
        ))
        .unwrap();
        log.append(&Event::tool_result(session, "call_1", "Buy milk", false))
            .unwrap();

        let calls = log.load_events(session, Some("tool_call")).unwrap();
        assert_eq!(calls.len(), 1);
        assert!(matches!(
            &calls[0].kind,
            EventKind::ToolCall { name, .. } if name == "ReadNote"
        ));
    }

    #[test]
    fn sessions_are_summarized() {
        let log = EventLog::in_memory().unwrap();
        let session = SessionId::new();

        log.append(&Event::new(session, EventKind::SessionStart))
            .unwrap();
        log.append(&Event::message(session, Role::User, "q")).unwrap();
        log.append(&Event::new(session, EventKind::SessionEnd))
            .unwrap();

        let sessions = log.list_sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, session);
        assert_eq!(sessions[0].message_count, 1);
        assert!(sessions[0].ended_at.is_some());
    }

    #[test]
    fn other_sessions_are_excluded() {
        let log = EventLog::in_memory().unwrap();
        let a = SessionId::new();
        let b = SessionId::new();

        log.append(&Event::message(a, Role::User, "for a")).unwrap();
        log.append(&Event::message(b, Role::User, "for b")).unwrap();

        assert_eq!(log.load_session(a).unwrap().len(), 1);
    }
}
