//! Domain model for stored notes.
//!
//! # Responsibility
//! - Define the canonical data structures used by the store and services.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
