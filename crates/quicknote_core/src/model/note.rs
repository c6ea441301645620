//! Note domain model.
//!
//! # Responsibility
//! - Define the typed note record and its index projection.
//! - Generate short, non-sequential note identifiers.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `NoteSummary` carries no content field.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of hex characters kept from a v4 UUID for a note id.
pub const NOTE_ID_LEN: usize = 8;

/// Opaque note identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Creates a note with a freshly generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(generate_note_id(), title, content)
    }

    /// Creates a note with a caller-provided id.
    ///
    /// Used by store-level paths that must control identity, such as
    /// collision checks.
    pub fn with_id(
        id: impl Into<NoteId>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Returns the index projection of this note.
    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Index entry for the `note://all` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
}

/// Generates a short random note id (lowercase hex).
pub fn generate_note_id() -> NoteId {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(NOTE_ID_LEN);
    id
}
