//! Attribute, skill rank and level assignment.
//!
//! These feed the point budgets and talent requirements, so they go through
//! the same versioned mutation path as talent changes.

use shardforge_domain::{Attribute, CharacterId, Skill, StatChange};

use super::{MutationResult, ProgressionStore, ProgressionUseCaseError};

pub struct AssignAttribute {
    store: ProgressionStore,
}

impl AssignAttribute {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        attribute: Attribute,
        value: u8,
    ) -> Result<MutationResult<StatChange>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| {
                p.assign_attribute(resolver, attribute, value)
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            attribute = %attribute,
            value,
            version = progression.version(),
            "Assigned attribute"
        );
        let summary = self.store.summarize(&progression);
        Ok(MutationResult { outcome, summary })
    }
}

pub struct AssignSkillRank {
    store: ProgressionStore,
}

impl AssignSkillRank {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        skill: Skill,
        rank: u8,
    ) -> Result<MutationResult<StatChange>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| {
                p.assign_skill_rank(resolver, skill, rank)
            })
            .await?;

        tracing::info!(
            character_id = %character_id,
            skill = %skill,
            rank,
            version = progression.version(),
            "Assigned skill rank"
        );
        let summary = self.store.summarize(&progression);
        Ok(MutationResult { outcome, summary })
    }
}

/// Changes level. Lowering it below what the build needs is rejected.
pub struct SetLevel {
    store: ProgressionStore,
}

impl SetLevel {
    pub fn new(store: ProgressionStore) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        character_id: CharacterId,
        level: u32,
    ) -> Result<MutationResult<StatChange>, ProgressionUseCaseError> {
        let (progression, outcome) = self
            .store
            .mutate(character_id, |p, resolver| p.set_level(resolver, level))
            .await?;

        tracing::info!(
            character_id = %character_id,
            level,
            version = progression.version(),
            "Set level"
        );
        let summary = self.store.summarize(&progression);
        Ok(MutationResult { outcome, summary })
    }
}
