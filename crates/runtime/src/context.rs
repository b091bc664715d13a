//! Note context preload.
//!
//! Renders the whole store into a system-prompt block so a question can
//! be answered without any tool round trips.

use crate::Result;
use storage::NoteStore;

/// Fetch the note index and every note, rendered for the system prompt.
pub fn preload(store: &dyn NoteStore) -> Result<String> {
    let index = store.index()?;

    let mut lines = Vec::with_capacity(index.note_ids.len());
    for id in &index.note_ids {
        let content = store
            .read(id)?
            .unwrap_or_else(|| "Note not found".to_string());
        lines.push(format!("{id}: {content}"));
    }

    if lines.is_empty() {
        return Ok("There are no stored notes.".to_string());
    }

    Ok(format!(
        "You have access to the following notes:\n\n{}\n\nAnswer the user's question based on these notes.",
        lines.join("\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryNoteStore;

    #[test]
    fn renders_every_note() {
        let store = MemoryNoteStore::seeded([
            ("note1", "Buy milk and eggs"),
            ("note2", "Call mom on Sunday"),
        ]);
        let block = preload(&store).unwrap();
        assert!(block.contains("note1: Buy milk and eggs"));
        assert!(block.contains("note2: Call mom on Sunday"));
    }

    #[test]
    fn empty_store_has_a_fallback() {
        let store = MemoryNoteStore::new();
        assert_eq!(preload(&store).unwrap(), "There are no stored notes.");
    }
}
