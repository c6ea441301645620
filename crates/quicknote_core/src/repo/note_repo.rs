//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/get/list/search/delete over the `notes` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Inserts never replace an existing row; a primary-key collision is
//!   reported as `RepoError::DuplicateIdentifier`.
//! - Search uses SQL `LIKE` on title and content; `%` and `_` in the query
//!   keep their wildcard meaning.
//! - A zero-row delete is not an error at this layer.

use crate::db::DbError;
use crate::model::note::{Note, NoteId, NoteSummary};
use log::debug;
use rusqlite::{ffi, params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT id, title, content FROM notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite I/O or constraint failure.
    Storage(DbError),
    /// Insert collided with an existing note id.
    DuplicateIdentifier(NoteId),
    /// Persisted row could not be decoded.
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage error: {err}"),
            Self::DuplicateIdentifier(id) => write!(f, "note id `{id}` already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run initialize first")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Repository interface for note operations.
pub trait NoteRepository {
    /// Creates one note with a generated id and returns the stored record.
    fn create_note(&self, title: &str, content: &str) -> RepoResult<Note>;
    /// Inserts a fully formed note. Fails on id collision.
    fn insert_note(&self, note: &Note) -> RepoResult<()>;
    /// Gets one note by id.
    fn get_note(&self, id: &str) -> RepoResult<Option<Note>>;
    /// Returns notes whose title or content matches `query`.
    fn search_notes(&self, query: &str) -> RepoResult<Vec<Note>>;
    /// Returns id + title for every note.
    fn list_summaries(&self) -> RepoResult<Vec<NoteSummary>>;
    /// Returns every stored note.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Deletes one note; returns whether a row was removed.
    fn delete_note(&self, id: &str) -> RepoResult<bool>;
    /// Returns the number of stored notes.
    fn count_notes(&self) -> RepoResult<u64>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from an initialized connection.
    ///
    /// Fails when the `notes` table or one of its columns is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, title: &str, content: &str) -> RepoResult<Note> {
        let note = Note::new(title, content);
        self.insert_note(&note)?;
        debug!("event=note_create module=repo status=ok note_id={}", note.id);
        Ok(note)
    }

    fn insert_note(&self, note: &Note) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO notes (id, title, content) VALUES (?1, ?2, ?3);",
                params![note.id.as_str(), note.title.as_str(), note.content.as_str()],
            )
            .map_err(|err| map_insert_error(err, &note.id))?;
        Ok(())
    }

    fn get_note(&self, id: &str) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn search_notes(&self, query: &str) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE title LIKE '%' || ?1 || '%'
                OR content LIKE '%' || ?1 || '%';"
        ))?;
        let mut rows = stmt.query([query])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        debug!(
            "event=note_search module=repo status=ok query_len={} hits={}",
            query.chars().count(),
            notes.len()
        );
        Ok(notes)
    }

    fn list_summaries(&self) -> RepoResult<Vec<NoteSummary>> {
        let mut stmt = self.conn.prepare("SELECT id, title FROM notes;")?;
        let mut rows = stmt.query([])?;
        let mut summaries = Vec::new();
        while let Some(row) = rows.next()? {
            summaries.push(NoteSummary {
                id: row.get("id")?,
                title: row.get("title")?,
            });
        }
        Ok(summaries)
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!("{NOTE_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn delete_note(&self, id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        debug!("event=note_delete module=repo status=ok note_id={id} removed={changed}");
        Ok(changed > 0)
    }

    fn count_notes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative note count `{count}`")))
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: String = row.get("id")?;
    if id.is_empty() {
        return Err(RepoError::InvalidData(
            "empty id value in notes.id".to_string(),
        ));
    }

    Ok(Note {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
    })
}

fn map_insert_error(err: rusqlite::Error, id: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || inner.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateIdentifier(id.to_string())
        }
        _ => err.into(),
    }
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }

    for column in ["id", "title", "content"] {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
