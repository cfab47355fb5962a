//! Read-only progression queries.

use shardforge_domain::{CharacterId, DomainError, ProgressionError, UnlockKind};

use super::{ProgressionSheet, ProgressionStore, ProgressionUseCaseError, TalentPreview};

/// Loads a character's sheet: summary, stats and derived values.
pub struct GetProgression {
    store: ProgressionStore,
}

impl GetProgression {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
    ) -> Result<ProgressionSheet, ProgressionUseCaseError> {
        let progression = self.store.load(character_id).await?;
        tracing::debug!(
            character_id = %character_id,
            version = progression.version(),
            "Loaded progression"
        );
        Ok(ProgressionSheet {
            summary: self.store.summarize(&progression),
            attributes: progression.attributes().clone(),
            skills: progression.skills().clone(),
            derived: progression.derived_stats(),
        })
    }
}

/// Reports whether a talent could be unlocked or refunded, without changing
/// anything. Lets a caller confirm advisory requirements before unlocking.
pub struct PreviewTalent {
    store: ProgressionStore,
}

impl PreviewTalent {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        talent_id: &str,
        is_ancestry: bool,
    ) -> Result<TalentPreview, ProgressionUseCaseError> {
        let progression = self.store.load(character_id).await?;
        let rules = self.store.rules();
        let tree = rules
            .tree_for_talent(talent_id)
            .map_err(ProgressionError::from)?;
        let node = tree
            .node(talent_id)
            .ok_or_else(|| ProgressionError::from(DomainError::not_found("talent", talent_id)))?;

        let resolver = self.store.resolver();
        let ancestry = is_ancestry || tree.path().is_singer();
        let unlock = resolver
            .can_unlock(&progression, talent_id, UnlockKind::Purchase { ancestry })
            .map_err(ProgressionError::from)?;
        let refund = resolver
            .can_refund(&progression, talent_id)
            .map_err(ProgressionError::from)?;

        tracing::debug!(
            character_id = %character_id,
            talent_id = %node.id,
            can_unlock = unlock.allowed,
            can_refund = refund.allowed,
            "Previewed talent"
        );

        Ok(TalentPreview {
            talent_id: node.id.clone(),
            path: tree.path(),
            unlocked: progression.ledger().is_unlocked(talent_id),
            unlock,
            refund,
        })
    }
}
