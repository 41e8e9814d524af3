//! Flat error taxonomy for the console core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// The data source could not produce the entity list.
    #[error("load failed: {0}")]
    LoadFailed(String),

    /// Create, update, delete or toggle was rejected by the data source.
    #[error("mutation failed: {0}")]
    MutationFailed(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("invalid draft: {0}")]
    InvalidDraft(String),
}

impl ConsoleError {
    /// Human-readable text shown in the panel banner.
    pub fn message(&self) -> &str {
        match self {
            ConsoleError::LoadFailed(m)
            | ConsoleError::MutationFailed(m)
            | ConsoleError::InvalidSchema(m)
            | ConsoleError::UnknownEntity(m)
            | ConsoleError::UnknownRole(m)
            | ConsoleError::InvalidDraft(m) => m,
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
