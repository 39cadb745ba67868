//! Error taxonomy for task store operations.
//!
//! Every failure maps onto one of three kinds: the referenced task is gone
//! ([`ErrorKind::NotFound`]), the input was rejected
//! ([`ErrorKind::Validation`]), or storage/transport broke
//! ([`ErrorKind::Infra`]). The HTTP layer and the terminal client both
//! branch on [`TaskError::kind`] rather than on individual variants.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Infra,
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task with ID {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response {0}: {1}")]
    UnexpectedStatus(u16, String),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::NotFound(_) => ErrorKind::NotFound,
            TaskError::Validation(_) => ErrorKind::Validation,
            TaskError::Storage(_) | TaskError::Transport(_) | TaskError::UnexpectedStatus(..) | TaskError::Join(_) => ErrorKind::Infra,
        }
    }
}
