//! Create progression use case.

use shardforge_domain::{Ancestry, CharacterId, CharacterProgression};

use super::{ProgressionStore, ProgressionSummary, ProgressionUseCaseError};

/// Stores an empty ledger when a character is created.
pub struct CreateProgression {
    store: ProgressionStore,
}

impl CreateProgression {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        level: u32,
        ancestry: Ancestry,
    ) -> Result<ProgressionSummary, ProgressionUseCaseError> {
        let progression = CharacterProgression::new(character_id, level, ancestry)?;
        self.store.repo().create(&progression).await?;

        tracing::info!(
            character_id = %character_id,
            level,
            ancestry = %ancestry,
            "Created progression"
        );
        Ok(self.store.summarize(&progression))
    }
}
