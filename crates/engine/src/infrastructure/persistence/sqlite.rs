//! SQLite-backed progression storage.

use std::sync::Arc;

use async_trait::async_trait;
use shardforge_domain::{CharacterId, CharacterProgression};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{ClockPort, ProgressionRepo, RepoError};

/// SQLite implementation of [`ProgressionRepo`].
///
/// One row per character. The aggregate is stored as JSON next to its
/// version so `save` can compare-and-swap in a single `UPDATE`.
pub struct SqliteProgressionRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteProgressionRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS character_progression (
                character_id TEXT PRIMARY KEY,
                version INTEGER NOT NULL,
                state_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_table", e))?;

        Ok(Self { pool, clock })
    }

    fn encode(progression: &CharacterProgression) -> Result<(String, i64), RepoError> {
        let json = serde_json::to_string(progression).map_err(RepoError::serialization)?;
        let version = i64::try_from(progression.version())
            .map_err(|_| RepoError::serialization("version out of range"))?;
        Ok((json, version))
    }
}

#[async_trait]
impl ProgressionRepo for SqliteProgressionRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterProgression>, RepoError> {
        let row = sqlx::query("SELECT state_json FROM character_progression WHERE character_id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("state_json");
                let progression =
                    serde_json::from_str(&json).map_err(RepoError::serialization)?;
                Ok(Some(progression))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, progression: &CharacterProgression) -> Result<(), RepoError> {
        let (json, version) = Self::encode(progression)?;
        let id = progression.character_id();

        let result = sqlx::query(
            r#"
            INSERT INTO character_progression (character_id, version, state_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(character_id) DO NOTHING
            "#,
        )
        .bind(id.to_string())
        .bind(version)
        .bind(json)
        .bind(self.clock.now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("create", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::already_exists("CharacterProgression", id));
        }
        Ok(())
    }

    async fn save(
        &self,
        progression: &CharacterProgression,
        expected_version: u64,
    ) -> Result<(), RepoError> {
        let (json, version) = Self::encode(progression)?;
        let id = progression.character_id();
        let expected = i64::try_from(expected_version)
            .map_err(|_| RepoError::serialization("version out of range"))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("save", e))?;

        let result = sqlx::query(
            r#"
            UPDATE character_progression
            SET version = ?, state_json = ?, updated_at = ?
            WHERE character_id = ? AND version = ?
            "#,
        )
        .bind(version)
        .bind(json)
        .bind(self.clock.now().to_rfc3339())
        .bind(id.to_string())
        .bind(expected)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("save", e))?;

        if result.rows_affected() == 0 {
            let current: Option<i64> =
                sqlx::query_scalar("SELECT version FROM character_progression WHERE character_id = ?")
                    .bind(id.to_string())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| RepoError::database("save", e))?;
            tx.rollback()
                .await
                .map_err(|e| RepoError::database("save", e))?;
            return Err(match current {
                Some(actual) => {
                    RepoError::conflict(id, expected_version, u64::try_from(actual).unwrap_or(0))
                }
                None => RepoError::not_found("CharacterProgression", id),
            });
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("save", e))?;
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM character_progression WHERE character_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use shardforge_domain::{Ancestry, PathId, RequirementMode, Resolver, RuleBook};

    async fn repo(dir: &tempfile::TempDir) -> SqliteProgressionRepo {
        let path = dir.path().join("progression.db");
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()));
        SqliteProgressionRepo::new(path.to_str().unwrap(), clock)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn stores_and_loads_full_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir).await;
        let rules = RuleBook::standard().unwrap();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);

        let mut p = CharacterProgression::new(CharacterId::new(), 2, Ancestry::Singer).unwrap();
        repo.create(&p).await.unwrap();

        p.select_path(&resolver, PathId::Warrior, true).unwrap();
        p.advance_version();
        repo.save(&p, 0).await.unwrap();

        let loaded = repo.get(p.character_id()).await.unwrap().unwrap();
        assert_eq!(loaded, p);
        assert!(loaded.ledger().is_unlocked("change_form"));
    }

    #[tokio::test]
    async fn stale_save_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir).await;
        let p = CharacterProgression::new(CharacterId::new(), 1, Ancestry::Human).unwrap();
        repo.create(&p).await.unwrap();

        let mut first = p.clone();
        first.advance_version();
        repo.save(&first, 0).await.unwrap();

        let mut second = p.clone();
        second.advance_version();
        let err = repo.save(&second, 0).await.unwrap_err();
        assert!(matches!(
            err,
            RepoError::Conflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn missing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(&dir).await;
        let p = CharacterProgression::new(CharacterId::new(), 1, Ancestry::Human).unwrap();

        assert_eq!(repo.get(p.character_id()).await.unwrap(), None);
        assert!(repo.save(&p, 0).await.unwrap_err().is_not_found());

        repo.create(&p).await.unwrap();
        assert!(matches!(
            repo.create(&p).await,
            Err(RepoError::AlreadyExists { .. })
        ));
        repo.delete(p.character_id()).await.unwrap();
        assert_eq!(repo.get(p.character_id()).await.unwrap(), None);
    }
}
