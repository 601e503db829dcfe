//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::bank::BankError;
use quiz_core::model::QuestionId;
use quiz_core::session::SessionError;
use storage::repository::StorageError;

/// Errors raised while ingesting a question file. Fatal at startup: no
/// session can run against a bank that failed to load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("cannot read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("question file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] BankError),
}

/// Errors emitted by `RegistrationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("invalid answer choice {0:?}")]
    InvalidChoice(String),

    #[error("question {0} missing from the bank")]
    MissingQuestion(QuestionId),
}
