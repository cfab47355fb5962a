//! Progression use cases.
//!
//! The caller-facing mutation API. Every mutation runs
//! load -> clone -> domain mutation -> invariant check -> versioned save, so
//! a failed call leaves the stored progression untouched. Conflicts are
//! returned, not retried.

mod change_starting_path;
mod create;
mod error;
mod query;
mod refund_talent;
mod remove_path;
mod select_path;
mod stats;
mod types;
mod unlock_talent;

pub use change_starting_path::ChangeStartingPath;
pub use create::CreateProgression;
pub use error::ProgressionUseCaseError;
pub use query::{GetProgression, PreviewTalent};
pub use refund_talent::RefundTalent;
pub use remove_path::RemovePath;
pub use select_path::SelectPath;
pub use stats::{AssignAttribute, AssignSkillRank, SetLevel};
pub use unlock_talent::UnlockTalent;
pub use types::{
    MutationResult, ProgressionSheet, ProgressionSummary, TalentPreview, UnlockedTalent,
};

use std::sync::Arc;

use shardforge_domain::{
    CharacterId, CharacterProgression, ProgressionError, RequirementMode, Resolver, RuleBook,
};

use crate::infrastructure::ports::{ProgressionRepo, RepoError};

/// Container for progression use cases.
pub struct ProgressionUseCases {
    pub create: Arc<CreateProgression>,
    pub select_path: Arc<SelectPath>,
    pub remove_path: Arc<RemovePath>,
    pub unlock_talent: Arc<UnlockTalent>,
    pub refund_talent: Arc<RefundTalent>,
    pub change_starting_path: Arc<ChangeStartingPath>,
    pub assign_attribute: Arc<AssignAttribute>,
    pub assign_skill_rank: Arc<AssignSkillRank>,
    pub set_level: Arc<SetLevel>,
    pub get: Arc<GetProgression>,
    pub preview_talent: Arc<PreviewTalent>,
}

impl ProgressionUseCases {
    pub fn new(store: ProgressionStore) -> Self {
        Self {
            create: Arc::new(CreateProgression::new(store.clone())),
            select_path: Arc::new(SelectPath::new(store.clone())),
            remove_path: Arc::new(RemovePath::new(store.clone())),
            unlock_talent: Arc::new(UnlockTalent::new(store.clone())),
            refund_talent: Arc::new(RefundTalent::new(store.clone())),
            change_starting_path: Arc::new(ChangeStartingPath::new(store.clone())),
            assign_attribute: Arc::new(AssignAttribute::new(store.clone())),
            assign_skill_rank: Arc::new(AssignSkillRank::new(store.clone())),
            set_level: Arc::new(SetLevel::new(store.clone())),
            get: Arc::new(GetProgression::new(store.clone())),
            preview_talent: Arc::new(PreviewTalent::new(store)),
        }
    }
}

/// Repository, rule tables and requirement mode shared by every use case.
#[derive(Clone)]
pub struct ProgressionStore {
    repo: Arc<dyn ProgressionRepo>,
    rules: Arc<RuleBook>,
    mode: RequirementMode,
}

impl ProgressionStore {
    pub fn new(repo: Arc<dyn ProgressionRepo>, rules: Arc<RuleBook>, mode: RequirementMode) -> Self {
        Self { repo, rules, mode }
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.rules, self.mode)
    }

    pub(crate) fn repo(&self) -> &dyn ProgressionRepo {
        self.repo.as_ref()
    }

    pub(crate) async fn load(
        &self,
        id: CharacterId,
    ) -> Result<CharacterProgression, ProgressionUseCaseError> {
        self.repo
            .get(id)
            .await?
            .ok_or(ProgressionUseCaseError::CharacterNotFound(id))
    }

    /// Applies `op` to a copy of the stored progression and saves it.
    ///
    /// Nothing is written unless `op` succeeds and the stored version still
    /// matches the loaded one.
    pub(crate) async fn mutate<T>(
        &self,
        id: CharacterId,
        op: impl FnOnce(&mut CharacterProgression, &Resolver<'_>) -> Result<T, ProgressionError> + Send,
    ) -> Result<(CharacterProgression, T), ProgressionUseCaseError> {
        let loaded = self.load(id).await?;
        let expected = loaded.version();

        let mut next = loaded;
        let outcome = op(&mut next, &self.resolver())?;
        next.advance_version();

        if let Err(e) = self.repo.save(&next, expected).await {
            match &e {
                RepoError::Conflict { actual, .. } => tracing::warn!(
                    character_id = %id,
                    expected,
                    actual,
                    "Progression changed concurrently; mutation discarded"
                ),
                _ => tracing::warn!(character_id = %id, error = %e, "Failed to save progression"),
            }
            return Err(e.into());
        }
        Ok((next, outcome))
    }

    pub(crate) fn summarize(&self, progression: &CharacterProgression) -> ProgressionSummary {
        ProgressionSummary::new(progression, &self.rules)
    }
}
