//! In-memory progression store.
//!
//! Does not persist data. Each entry is updated under its dashmap shard lock,
//! so the version check and the write happen atomically.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shardforge_domain::{CharacterId, CharacterProgression};

use crate::infrastructure::ports::{ProgressionRepo, RepoError};

#[derive(Debug, Default)]
pub struct InMemoryProgressionRepo {
    entries: DashMap<CharacterId, CharacterProgression>,
}

impl InMemoryProgressionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ProgressionRepo for InMemoryProgressionRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterProgression>, RepoError> {
        Ok(self.entries.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, progression: &CharacterProgression) -> Result<(), RepoError> {
        match self.entries.entry(progression.character_id()) {
            Entry::Occupied(_) => Err(RepoError::already_exists(
                "CharacterProgression",
                progression.character_id(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(progression.clone());
                Ok(())
            }
        }
    }

    async fn save(
        &self,
        progression: &CharacterProgression,
        expected_version: u64,
    ) -> Result<(), RepoError> {
        let id = progression.character_id();
        let mut stored = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("CharacterProgression", id))?;
        if stored.version() != expected_version {
            return Err(RepoError::conflict(id, expected_version, stored.version()));
        }
        *stored = progression.clone();
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.entries.remove(&id);
        Ok(())
    }
}
