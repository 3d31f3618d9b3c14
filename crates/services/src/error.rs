//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Rejected quiz actions. The session is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("participant name cannot be empty")]
    EmptyName,
    #[error("a name has already been submitted")]
    NameAlreadySubmitted,
    #[error("quiz is not in progress")]
    NotInProgress,
    #[error("{option:?} is not an option of the current question")]
    UnknownOption { option: String },
    #[error("already at the first question")]
    AtFirstQuestion,
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResponseBrowser`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BrowserError {
    #[error("no response is selected")]
    NothingSelected,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
