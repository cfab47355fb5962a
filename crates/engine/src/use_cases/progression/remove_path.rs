//! Remove path use case.

use shardforge_domain::{CharacterId, PathId, PathRemoved};

use super::{MutationResult, ProgressionStore, ProgressionUseCaseError};

/// Removes a path, refunding everything still unlocked in it.
pub struct RemovePath {
    store: ProgressionStore,
}

impl RemovePath {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        path: PathId,
    ) -> Result<MutationResult<PathRemoved>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| p.remove_path(resolver, path))
            .await?;

        tracing::info!(
            character_id = %character_id,
            path = %path,
            refunded = outcome.refunded.len(),
            was_starting = outcome.was_starting,
            version = progression.version(),
            "Removed path"
        );

        let summary = self.store.summarize(&progression);
        Ok(MutationResult { outcome, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::progression::test_support::{read_only, rules, serving, store, warrior};
    use shardforge_domain::{ProgressionError, RequirementMode, Resolver, TalentId};

    #[tokio::test]
    async fn removes_path_with_only_key_unlocked() {
        let p = warrior(1);
        let id = p.character_id();

        let result = RemovePath::new(store(serving(p)))
            .execute(id, PathId::Warrior)
            .await
            .unwrap();

        assert_eq!(result.outcome.refunded, vec![TalentId::new("vigilant_stance")]);
        assert!(result.summary.selected_paths.is_empty());
        assert_eq!(result.summary.starting_path, None);
    }

    #[tokio::test]
    async fn key_with_dependents_blocks_removal() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let mut p = warrior(1);
        p.unlock_talent(&resolver, "practiced_kata", false).unwrap();
        let id = p.character_id();

        let err = RemovePath::new(store(read_only(p)))
            .execute(id, PathId::Warrior)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProgressionUseCaseError::Rejected(ProgressionError::KeyTalentHasDependents { .. })
        ));
    }
}
