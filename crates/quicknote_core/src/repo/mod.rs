//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for notes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs report storage failures and never swallow them.
//! - "Not found" is expressed as `Option`/`bool`; turning it into an error
//!   belongs to the service layer.

pub mod note_repo;
