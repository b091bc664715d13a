//! SQLite-backed note store.

use crate::{NoteStore, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;

/// Persistent note store.
///
/// Interchangeable with [`crate::MemoryNoteStore`] behind the
/// [`NoteStore`] trait; the orchestration layer cannot tell them apart.
pub struct SqliteNoteStore {
    conn: Mutex<Connection>,
}

impl SqliteNoteStore {
    /// Open or create a note store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_conn(Connection::open(path)?)
    }

    /// Create an in-memory note store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        Self::from_conn(Connection::open_in_memory()?)
    }

    fn from_conn(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoteStore for SqliteNoteStore {
    fn list(&self) -> Result<Vec<String>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id FROM notes ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<Option<String>> {
        let content = self
            .lock()
            .query_row("SELECT content FROM notes WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(content)
    }

    fn create(&self, id: &str, content: &str) -> Result<bool> {
        let inserted = self.lock().execute(
            "INSERT OR IGNORE INTO notes (id, content) VALUES (?1, ?2)",
            params![id, content],
        )?;
        Ok(inserted > 0)
    }
}
