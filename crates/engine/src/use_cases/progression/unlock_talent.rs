//! Unlock talent use case.

use shardforge_domain::{CharacterId, TalentUnlocked};

use super::{MutationResult, ProgressionStore, ProgressionUseCaseError};

/// Spends a talent (or ancestry) point on a talent.
pub struct UnlockTalent {
    store: ProgressionStore,
}

impl UnlockTalent {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    /// # Arguments
    /// * `talent_id` - Talent to unlock
    /// * `is_ancestry` - Pay from the ancestry pool. Singer talents always do.
    pub async fn execute(
        &self,
        character_id: CharacterId,
        talent_id: &str,
        is_ancestry: bool,
    ) -> Result<MutationResult<TalentUnlocked>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| {
                p.unlock_talent(resolver, talent_id, is_ancestry)
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            talent_id = %outcome.talent_id,
            path = %outcome.path,
            ancestry = outcome.ancestry,
            version = progression.version(),
            "Unlocked talent"
        );
        if !outcome.advisories.is_empty() {
            tracing::debug!(
                talent_id = %outcome.talent_id,
                advisories = ?outcome.advisories,
                "Unlock relies on unverified narrative requirements"
            );
        }

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
    use crate::infrastructure::ports::MockProgressionRepo;
    use crate::use_cases::progression::test_support::{read_only, rules, serving, store, warrior};
    use shardforge_domain::{
        BlockingReason, PointPool, ProgressionError, RequirementMode, Resolver, TalentId,
    };

    #[tokio::test]
    async fn unlock_spends_a_point() {
        let p = warrior(1);
        let id = p.character_id();
        let before = p.available_talent_points();

        let result = UnlockTalent::new(store(serving(p)))
            .execute(id, "practiced_kata", false)
            .await
            .unwrap();

        assert_eq!(result.outcome.talent_id, TalentId::new("practiced_kata"));
        assert_eq!(result.summary.available_talent_points, before - 1);
    }

    #[tokio::test]
    async fn missing_prerequisites_are_listed() {
        let p = warrior(1);
        let id = p.character_id();

        let err = UnlockTalent::new(store(read_only(p)))
            .execute(id, "flamestance", false)
            .await
            .unwrap_err();

        match err.rejection() {
            Some(ProgressionError::PrerequisiteNotMet { reasons, .. }) => {
                assert!(reasons.contains(&BlockingReason::MissingPrerequisite {
                    talent_id: TalentId::new("practiced_kata")
                }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_pool_is_insufficient_points() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let mut p = warrior(1);
        p.unlock_talent(&resolver, "practiced_kata", false).unwrap();
        let id = p.character_id();

        let err = UnlockTalent::new(store(read_only(p)))
            .execute(id, "combat_training", false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProgressionUseCaseError::Rejected(ProgressionError::InsufficientPoints {
                pool: PointPool::Talent,
                available: 0
            })
        ));
    }

    #[tokio::test]
    async fn unknown_talent_is_not_found() {
        let p = warrior(1);
        let id = p.character_id();
        let mut repo = MockProgressionRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(p.clone())));
        repo.expect_save().never();

        let err = UnlockTalent::new(store(repo))
            .execute(id, "windmill", false)
            .await
            .unwrap_err();
        assert!(err.rejection().is_some_and(|e| e.is_not_found()));
    }
}
