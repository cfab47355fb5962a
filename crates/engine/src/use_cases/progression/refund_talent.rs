//! Refund talent use case.

use shardforge_domain::{CharacterId, TalentRefunded};

use super::{MutationResult, ProgressionStore, ProgressionUseCaseError};

/// Returns a talent's point to its pool.
pub struct RefundTalent {
    store: ProgressionStore,
}

impl RefundTalent {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        talent_id: &str,
    ) -> Result<MutationResult<TalentRefunded>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| p.refund_talent(resolver, talent_id))
            .await?;

        tracing::info!(
            character_id = %character_id,
            talent_id = %outcome.talent_id,
            path = %outcome.path,
            version = progression.version(),
            "Refunded talent"
        );

        let summary = self.store.summarize(&progression);
        Ok(MutationResult { outcome, summary })
    }
}
