//! Repository port for progression storage.

use async_trait::async_trait;
use shardforge_domain::{CharacterId, CharacterProgression};

use super::error::RepoError;

/// Stores one [`CharacterProgression`] per character.
///
/// `save` is a compare-and-swap: it writes only when the stored version
/// equals `expected_version`, and the written aggregate carries the new
/// version. Readers never observe a partially applied mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressionRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterProgression>, RepoError>;

    /// Inserts a new progression. Fails with `AlreadyExists` if one is stored.
    async fn create(&self, progression: &CharacterProgression) -> Result<(), RepoError>;

    /// Replaces the stored progression if its version is `expected_version`.
    async fn save(
        &self,
        progression: &CharacterProgression,
        expected_version: u64,
    ) -> Result<(), RepoError>;

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}
