//! Note use-case service.
//!
//! # Responsibility
//! - Provide add/search/delete/get/list use-cases over a note repository.
//! - Turn point-lookup and delete misses into `NotFound` failures.
//! - Render the summarization prompt from stored notes.
//!
//! # Invariants
//! - Unknown summary styles fall back to the brief suffix; they never fail.
//! - Storage failures propagate unchanged; nothing is retried.

use crate::model::note::{Note, NoteId, NoteSummary};
use crate::repo::note_repo::{NoteRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Prompt returned when the store holds no notes.
pub const EMPTY_SUMMARY_PROMPT: &str = "There are no notes to summarize.";
/// Style value that selects the detailed suffix.
pub const DETAILED_STYLE: &str = "detailed";
/// Style used when the caller does not pass one.
pub const DEFAULT_STYLE: &str = "brief";

const BRIEF_SUFFIX: &str = "Please provide a brief, one-paragraph summary.";
const DETAILED_SUFFIX: &str = "Please provide a detailed summary of each note, \
highlighting key themes and connections between them.";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NotFound(NoteId),
    /// Generated id collided with a stored note.
    DuplicateIdentifier(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Note '{id}' not found."),
            Self::DuplicateIdentifier(id) => write!(f, "Note id '{id}' already exists."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateIdentifier(id) => Self::DuplicateIdentifier(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// Summary flavour requested from the prompt generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    Brief,
    Detailed,
}

impl SummaryStyle {
    /// Maps a caller-supplied style; anything but `"detailed"` is brief.
    pub fn from_label(label: &str) -> Self {
        if label == DETAILED_STYLE {
            Self::Detailed
        } else {
            Self::Brief
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Brief => BRIEF_SUFFIX,
            Self::Detailed => DETAILED_SUFFIX,
        }
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note and returns it with its assigned id.
    pub fn add_note(&self, title: &str, content: &str) -> ServiceResult<Note> {
        Ok(self.repo.create_note(title, content)?)
    }

    /// Returns notes whose title or content contains `query`.
    pub fn search_notes(&self, query: &str) -> ServiceResult<Vec<Note>> {
        Ok(self.repo.search_notes(query)?)
    }

    /// Deletes one note and returns a confirmation naming its id.
    pub fn delete_note(&self, note_id: &str) -> ServiceResult<String> {
        if !self.repo.delete_note(note_id)? {
            return Err(NoteServiceError::NotFound(note_id.to_string()));
        }
        Ok(format!("Deleted note '{note_id}'."))
    }

    /// Gets one note by id.
    pub fn get_note(&self, note_id: &str) -> ServiceResult<Note> {
        self.repo
            .get_note(note_id)?
            .ok_or_else(|| NoteServiceError::NotFound(note_id.to_string()))
    }

    /// Lists id + title of every note.
    pub fn list_notes(&self) -> ServiceResult<Vec<NoteSummary>> {
        Ok(self.repo.list_summaries()?)
    }

    /// Builds a prompt asking for a summary of every stored note.
    pub fn summarize_notes(&self, style: &str) -> ServiceResult<String> {
        let notes = self.repo.list_notes()?;
        Ok(render_summary_prompt(&notes, SummaryStyle::from_label(style)))
    }
}

/// Renders the summarization prompt for `notes`.
///
/// One bullet line per note, in the given order, followed by the suffix for
/// `style`.
pub fn render_summary_prompt(notes: &[Note], style: SummaryStyle) -> String {
    if notes.is_empty() {
        return EMPTY_SUMMARY_PROMPT.to_string();
    }

    let note_list = notes
        .iter()
        .map(|note| format!("- **{}**: {}", note.title, note.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Here are all my notes:\n\n{note_list}\n\n{}",
        style.suffix()
    )
}

#[cfg(test)]
mod tests {
    use super::{render_summary_prompt, SummaryStyle, EMPTY_SUMMARY_PROMPT};
    use crate::model::note::Note;

    #[test]
    fn style_labels_fall_back_to_brief() {
        assert_eq!(SummaryStyle::from_label("detailed"), SummaryStyle::Detailed);
        assert_eq!(SummaryStyle::from_label("brief"), SummaryStyle::Brief);
        assert_eq!(SummaryStyle::from_label("Detailed"), SummaryStyle::Brief);
        assert_eq!(SummaryStyle::from_label(""), SummaryStyle::Brief);
    }

    #[test]
    fn empty_note_list_renders_fixed_literal() {
        assert_eq!(
            render_summary_prompt(&[], SummaryStyle::Detailed),
            EMPTY_SUMMARY_PROMPT
        );
    }

    #[test]
    fn prompt_lists_one_bullet_per_note() {
        let notes = vec![
            Note::with_id("00000001", "Meeting Notes", "Discuss Q1 roadmap"),
            Note::with_id("00000002", "Groceries", "milk"),
        ];
        let prompt = render_summary_prompt(&notes, SummaryStyle::Brief);
        assert_eq!(
            prompt,
            "Here are all my notes:\n\n\
             - **Meeting Notes**: Discuss Q1 roadmap\n\
             - **Groceries**: milk\n\n\
             Please provide a brief, one-paragraph summary."
        );
    }

    #[test]
    fn detailed_prompt_asks_for_themes() {
        let notes = vec![Note::with_id("00000001", "A", "b")];
        let prompt = render_summary_prompt(&notes, SummaryStyle::Detailed);
        assert!(prompt.ends_with(
            "Please provide a detailed summary of each note, \
             highlighting key themes and connections between them."
        ));
    }
}
