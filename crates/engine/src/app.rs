//! Application state and composition.

use std::sync::Arc;

use shardforge_domain::{RequirementMode, RuleBook, RuleTableError};

use crate::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    persistence::{InMemoryProgressionRepo, SqliteProgressionRepo},
    ports::{ClockPort, ProgressionRepo, RepoError},
};
use crate::use_cases::progression::{ProgressionStore, ProgressionUseCases};

/// Errors while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Rule tables invalid: {0}")]
    Rules(#[from] RuleTableError),
    #[error("Storage unavailable: {0}")]
    Storage(#[from] RepoError),
}

/// Main application state.
///
/// Holds the validated rule tables, the progression store and its use cases.
pub struct App {
    pub rules: Arc<RuleBook>,
    pub repo: Arc<dyn ProgressionRepo>,
    pub progression: ProgressionUseCases,
}

impl App {
    /// Wires use cases around an existing repository.
    pub fn new(repo: Arc<dyn ProgressionRepo>, mode: RequirementMode) -> Result<Self, AppError> {
        let rules = RuleBook::standard()?;
        let store = ProgressionStore::new(repo.clone(), rules.clone(), mode);
        Ok(Self {
            rules,
            repo,
            progression: ProgressionUseCases::new(store),
        })
    }

    /// Opens the SQLite store named in `config`.
    pub async fn from_config(config: &EngineConfig) -> Result<Self, AppError> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let repo = SqliteProgressionRepo::new(&config.progression_db, clock).await?;
        Self::new(Arc::new(repo), config.requirement_mode)
    }

    /// Non-persistent app, for tests and embedding.
    pub fn in_memory(mode: RequirementMode) -> Result<Self, AppError> {
        Self::new(Arc::new(InMemoryProgressionRepo::new()), mode)
    }
}
