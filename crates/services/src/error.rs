//! Shared error types for the services crate.

use thiserror::Error;

use flashy_core::model::{CardError, ParseIdError, QuizError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LibrarySync`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyncError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz generation client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),
    #[error("could not read {path}: {message}")]
    Read { path: String, message: String },
    #[error("invalid generator endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("no quiz questions were generated")]
    Empty,
    #[error("generator returned an invalid card: {0}")]
    InvalidCard(#[from] CardError),
    #[error("generator response was malformed: {0}")]
    Malformed(String),
    #[error("{detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while establishing the user identity.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ThemeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThemeServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
