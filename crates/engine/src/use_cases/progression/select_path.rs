//! Select path use case.

use shardforge_domain::{CharacterId, PathId, PathSelected};

use super::{MutationResult, ProgressionStore, ProgressionUseCaseError};

/// Adds a starting or multiclass path and unlocks its key talent.
pub struct SelectPath {
    store: ProgressionStore,
}

impl SelectPath {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        path: PathId,
        as_starting: bool,
    ) -> Result<MutationResult<PathSelected>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| {
                p.select_path(resolver, path, as_starting)
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            path = %path,
            as_starting,
            key_talent = %outcome.key_talent,
            version = progression.version(),
            "Selected path"
        );

        let summary = self
            .store
            .summarize(&progression)
            .with_advisories(outcome.advisories.clone());
        Ok(MutationResult { outcome, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockProgressionRepo, RepoError};
    use crate::use_cases::progression::test_support::{fresh, read_only, serving, store, warrior};
    use shardforge_domain::{Ancestry, ProgressionError, Skill, TalentId};

    #[tokio::test]
    async fn starting_path_is_saved_with_next_version() {
        let p = fresh(1, Ancestry::Human);
        let id = p.character_id();
        let use_case = SelectPath::new(store(serving(p)));

        let result = use_case.execute(id, PathId::Hunter, true).await.unwrap();

        assert_eq!(result.outcome.key_talent, TalentId::new("seek_quarry"));
        assert_eq!(result.outcome.starting_skill, Some(Skill::Perception));
        assert_eq!(result.summary.version, 1);
        assert_eq!(result.summary.starting_path, Some(PathId::Hunter));
        assert_eq!(result.summary.unlocked_talents.len(), 1);
    }

    #[tokio::test]
    async fn radiant_multiclass_carries_advisory() {
        let p = warrior(2);
        let id = p.character_id();
        let use_case = SelectPath::new(store(serving(p)));

        let result = use_case.execute(id, PathId::Stoneward, false).await.unwrap();

        assert_eq!(result.summary.advisories, vec!["Speak the First Ideal"]);
        assert_eq!(result.summary.version, 4);
    }

    #[tokio::test]
    async fn rejection_does_not_save() {
        let p = warrior(1);
        let id = p.character_id();
        let use_case = SelectPath::new(store(read_only(p)));

        let err = use_case.execute(id, PathId::Agent, true).await.unwrap_err();
        assert!(matches!(
            err,
            ProgressionUseCaseError::Rejected(ProgressionError::AlreadyHasStartingPath {
                current: PathId::Warrior
            })
        ));
    }

    #[tokio::test]
    async fn unknown_character() {
        let mut repo = MockProgressionRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_save().never();

        let err = SelectPath::new(store(repo))
            .execute(CharacterId::new(), PathId::Warrior, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressionUseCaseError::CharacterNotFound(_)));
    }

    #[tokio::test]
    async fn conflict_is_surfaced() {
        let p = fresh(1, Ancestry::Human);
        let id = p.character_id();
        let mut repo = MockProgressionRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(p.clone())));
        repo.expect_save()
            .returning(move |_, expected| Err(RepoError::conflict(id, expected, expected + 1)));

        let err = SelectPath::new(store(repo))
            .execute(id, PathId::Warrior, true)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }
}
