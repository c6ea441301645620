//! Caller-visible failure type for the operation surface.

use crate::db::DbError;
use crate::repo::note_repo::RepoError;
use crate::service::note_service::NoteServiceError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type OperationResult<T> = Result<T, OperationError>;

/// Failure category reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationErrorKind {
    /// Arguments are missing or have the wrong shape.
    Validation,
    /// The addressed note does not exist.
    NotFound,
    /// A generated note id collided with a stored one.
    DuplicateIdentifier,
    /// The store failed below the business logic.
    Storage,
    /// No tool, resource or prompt is registered under that name.
    UnknownOperation,
}

impl OperationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::DuplicateIdentifier => "duplicate_identifier",
            Self::Storage => "storage",
            Self::UnknownOperation => "unknown_operation",
        }
    }
}

/// Structured failure: a kind plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationError {
    pub kind: OperationErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: OperationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(OperationErrorKind::Validation, message)
    }

    pub fn unknown_operation(message: impl Into<String>) -> Self {
        Self::new(OperationErrorKind::UnknownOperation, message)
    }
}

impl Display for OperationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for OperationError {}

impl From<NoteServiceError> for OperationError {
    fn from(value: NoteServiceError) -> Self {
        match value {
            NoteServiceError::NotFound(_) => {
                Self::new(OperationErrorKind::NotFound, value.to_string())
            }
            NoteServiceError::DuplicateIdentifier(_) => {
                Self::new(OperationErrorKind::DuplicateIdentifier, value.to_string())
            }
            NoteServiceError::Repo(err) => err.into(),
        }
    }
}

impl From<RepoError> for OperationError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateIdentifier(_) => {
                Self::new(OperationErrorKind::DuplicateIdentifier, value.to_string())
            }
            other => Self::new(OperationErrorKind::Storage, other.to_string()),
        }
    }
}

impl From<DbError> for OperationError {
    fn from(value: DbError) -> Self {
        Self::new(OperationErrorKind::Storage, value.to_string())
    }
}
