//! Core of the QuickNote service.
//! This crate owns the note store, its use-cases and the operation surface.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod server;
pub mod service;

pub use config::Config;
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::note::{generate_note_id, Note, NoteId, NoteSummary};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use server::{
    Arguments, NotesServer, OperationError, OperationErrorKind, OperationRegistry,
    OperationResult,
};
pub use service::note_service::{
    render_summary_prompt, NoteService, NoteServiceError, SummaryStyle,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
