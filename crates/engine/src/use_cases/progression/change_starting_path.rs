//! Change starting path use case.

use shardforge_domain::{BuildReset, CharacterId};

use super::{MutationResult, ProgressionStore, ProgressionUseCaseError};

/// Clears a reset build so a new starting path can be selected.
pub struct ChangeStartingPath {
    store: ProgressionStore,
}

impl ChangeStartingPath {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
    ) -> Result<MutationResult<BuildReset>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| p.change_starting_path(resolver))
            .await?;

        tracing::info!(
            character_id = %character_id,
            previous = %outcome.previous_starting_path,
            cleared_talents = outcome.cleared_talents.len(),
            version = progression.version(),
            "Cleared starting path"
        );

        let summary = self.store.summarize(&progression);
        Ok(MutationResult { outcome, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::progression::test_support::{read_only, rules, serving, store, warrior};
    use shardforge_domain::{PathId, ProgressionError, RequirementMode, Resolver};

    #[tokio::test]
    async fn reset_build_clears_everything() {
        let p = warrior(1);
        let id = p.character_id();

        let result = ChangeStartingPath::new(store(serving(p)))
            .execute(id)
            .await
            .unwrap();

        assert_eq!(result.outcome.previous_starting_path, PathId::Warrior);
        assert!(result.summary.unlocked_talents.is_empty());
        assert_eq!(result.summary.starting_path, None);
    }

    #[tokio::test]
    async fn extra_talents_block_the_change() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let mut p = warrior(1);
        p.unlock_talent(&resolver, "practiced_kata", false).unwrap();
        let id = p.character_id();

        let err = ChangeStartingPath::new(store(read_only(p)))
            .execute(id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProgressionUseCaseError::Rejected(ProgressionError::BuildNotReset { .. })
        ));
    }
}
