//! Progression use case errors.

use shardforge_domain::{CharacterId, ProgressionError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during progression operations.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionUseCaseError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error(transparent)]
    Rejected(#[from] ProgressionError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ProgressionUseCaseError {
    /// Another writer committed first; reload and retry at the caller.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Repo(e) if e.is_conflict())
    }

    pub fn rejection(&self) -> Option<&ProgressionError> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}
