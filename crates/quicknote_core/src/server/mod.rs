//! Operation surface over the note store.
//!
//! # Responsibility
//! - Expose the note tools, resources and prompt as typed entry points.
//! - Open one store handle per call and release it on every exit path.
//! - Convert store and service failures into caller-visible
//!   [`OperationError`] values.
//!
//! # Invariants
//! - `NotesServer` holds configuration only; no connection outlives a call.
//! - The schema is initialized by [`NotesServer::start`] before any call.

mod error;
pub mod registry;

pub use error::{OperationError, OperationErrorKind, OperationResult};
pub use registry::{
    Arguments, OperationDescriptor, OperationRegistry, ParameterDescriptor, ResourceDescriptor,
};

use crate::config::Config;
use crate::db::{connect, initialize};
use crate::model::note::{Note, NoteSummary};
use crate::repo::note_repo::SqliteNoteRepository;
use crate::service::note_service::{NoteService, ServiceResult, DEFAULT_STYLE};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Request handler bound to one notes database.
///
/// Cheap to share across threads; each call opens its own connection.
#[derive(Debug, Clone)]
pub struct NotesServer {
    db_path: PathBuf,
}

impl NotesServer {
    /// Initializes the schema at `config.db_path` and returns a ready server.
    pub fn start(config: &Config) -> OperationResult<Self> {
        initialize(&config.db_path)?;
        Ok(Self::new(config.db_path.clone()))
    }

    /// Builds a server for an already initialized database.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Returns the database path served by this instance.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Tool `add_note`: creates a note and returns it.
    pub fn add_note(&self, title: &str, content: &str) -> OperationResult<Note> {
        self.with_service("add_note", |service| service.add_note(title, content))
    }

    /// Tool `search_notes`: substring search on title and content.
    pub fn search_notes(&self, query: &str) -> OperationResult<Vec<Note>> {
        self.with_service("search_notes", |service| service.search_notes(query))
    }

    /// Tool `delete_note`: removes a note, failing with `NotFound` on a miss.
    pub fn delete_note(&self, note_id: &str) -> OperationResult<String> {
        self.with_service("delete_note", |service| service.delete_note(note_id))
    }

    /// Resource `note://{note_id}`.
    pub fn get_note(&self, note_id: &str) -> OperationResult<Note> {
        self.with_service("get_note", |service| service.get_note(note_id))
    }

    /// Resource `note://all`.
    pub fn list_notes(&self) -> OperationResult<Vec<NoteSummary>> {
        self.with_service("list_notes", |service| service.list_notes())
    }

    /// Prompt `summarize_notes`; `None` selects the brief style.
    pub fn summarize_notes(&self, style: Option<&str>) -> OperationResult<String> {
        let style = style.unwrap_or(DEFAULT_STYLE);
        self.with_service("summarize_notes", |service| service.summarize_notes(style))
    }

    fn with_service<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> ServiceResult<T>,
    ) -> OperationResult<T> {
        let started_at = Instant::now();
        let result = self.run_scoped(f);
        match &result {
            Ok(_) => debug!(
                "event=operation module=server status=ok operation={operation} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=operation module=server status=error operation={operation} duration_ms={} error_kind={}",
                started_at.elapsed().as_millis(),
                err.kind.as_str()
            ),
        }
        result
    }

    fn run_scoped<T>(
        &self,
        f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> ServiceResult<T>,
    ) -> OperationResult<T> {
        let conn = connect(&self.db_path)?;
        let repo = SqliteNoteRepository::try_new(&conn)?;
        let service = NoteService::new(repo);
        Ok(f(&service)?)
    }
}
