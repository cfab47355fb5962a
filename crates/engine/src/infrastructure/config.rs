//! Engine configuration from the environment.
//!
//! | Variable              | Default          |
//! |-----------------------|------------------|
//! | `PROGRESSION_DB`      | `progression.db` |
//! | `STRICT_REQUIREMENTS` | `false`          |

use shardforge_domain::RequirementMode;

pub const DEFAULT_PROGRESSION_DB: &str = "progression.db";

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// SQLite file holding character progressions.
    pub progression_db: String,
    pub requirement_mode: RequirementMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            progression_db: DEFAULT_PROGRESSION_DB.to_string(),
            requirement_mode: RequirementMode::Advisory,
        }
    }
}

impl EngineConfig {
    /// Reads the process environment. Call after `.env` files are loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let progression_db = lookup("PROGRESSION_DB")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PROGRESSION_DB.to_string());

        let requirement_mode = match lookup("STRICT_REQUIREMENTS") {
            Some(value) => value
                .parse::<RequirementMode>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "STRICT_REQUIREMENTS",
                    value,
                })?,
            None => RequirementMode::Advisory,
        };

        Ok(Self {
            progression_db,
            requirement_mode,
        })
    }
}
