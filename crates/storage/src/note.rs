//! The note store, the service that tools ultimately act upon.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
}

/// The read-only note index resource, encoded as `{"note_ids": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteIndex {
    pub note_ids: Vec<String>,
}

impl NoteIndex {
    /// Encode the index as its JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Storage interface for notes.
///
/// Implementations are injected into the tool executor at construction
/// time, so the orchestration logic never depends on a concrete store.
pub trait NoteStore: Send + Sync {
    /// All note ids, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// The content of a note, or `None` if no note has that id.
    fn read(&self, id: &str) -> Result<Option<String>>;

    /// Create a note. Returns `false` without modifying the store if
    /// the id is already taken.
    fn create(&self, id: &str, content: &str) -> Result<bool>;

    /// Snapshot the store as a [`NoteIndex`].
    fn index(&self) -> Result<NoteIndex> {
        Ok(NoteIndex {
            note_ids: self.list()?,
        })
    }
}

/// In-memory note store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<BTreeMap<String, String>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given notes.
    pub fn seeded<I, S>(notes: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            notes: Mutex::new(
                notes
                    .into_iter()
                    .map(|(id, content)| (id.into(), content.into()))
                    .collect(),
            ),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.notes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoteStore for MemoryNoteStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<Option<String>> {
        Ok(self.lock().get(id).cloned())
    }

    fn create(&self, id: &str, content: &str) -> Result<bool> {
        let mut notes = self.lock();
        if notes.contains_key(id) {
            return Ok(false);
        }
        notes.insert(id.to_string(), content.to_string());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_read() {
        let store = MemoryNoteStore::new();
        assert!(store.create("note1", "Buy milk and eggs").unwrap());
        assert_eq!(
            store.read("note1").unwrap().as_deref(),
            Some("Buy milk and eggs")
        );
    }

    #[test]
    fn read_missing_is_none() {
        let store = MemoryNoteStore::new();
        assert_eq!(store.read("nope").unwrap(), None);
    }

    #[test]
    fn create_existing_leaves_content_unchanged() {
        let store = MemoryNoteStore::seeded([("note1", "original")]);
        assert!(!store.create("note1", "replacement").unwrap());
        assert_eq!(store.read("note1").unwrap().as_deref(), Some("original"));
    }

    #[test]
    fn list_is_sorted() {
        let store = MemoryNoteStore::seeded([("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(store.list().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn index_wire_form() {
        let store = MemoryNoteStore::seeded([("note1", "x"), ("note2", "y")]);
        let json = store.index().unwrap().to_json().unwrap();
        assert_eq!(json, r#"{"note_ids":["note1","note2"]}"#);
    }
}
