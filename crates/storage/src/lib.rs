//! Persistence layer for Quill: the note store and the session event log.
//!
//! # Overview
//!
//! Two concerns live here:
//!
//! 1. **Notes**: the data the assistant's tools act upon. The
//!    [`NoteStore`] trait abstracts the store so the runtime can be
//!    handed a [`MemoryNoteStore`] (tests, demos) or a
//!    [`SqliteNoteStore`] (persistent) without caring which.
//!
//! 2. **Session events**: an append-only audit trail of every
//!    conversation turn and tool invocation, kept in SQLite by the
//!    [`EventLog`]. This is what `quill sessions` and `quill logs`
//!    read back.
//!
//! # Example
//!
//! ```no_run
//! use storage::{Event, EventKind, EventLog, NoteStore, Role, SessionId, SqliteNoteStore};
//!
//! let notes = SqliteNoteStore::open("quill.db")?;
//! notes.create("note1", "Buy milk and eggs")?;
//!
//! let log = EventLog::open("quill.db")?;
//! let session = SessionId::new();
//! log.append(&Event::new(session, EventKind::SessionStart))?;
//! log.append(&Event::message(session, Role::User, "What do I need from the store?"))?;
//! # Ok::<(), storage::Error>(())
//! ```

mod error;
mod event;
mod log;
mod note;
mod sqlite;

pub use error::{Error, Result};
pub use event::{Event, EventKind, Role, SessionId};
pub use log::{EventLog, SessionSummary};
pub use note::{MemoryNoteStore, Note, NoteIndex, NoteStore};
pub use sqlite::SqliteNoteStore;
