//! CharacterProgression aggregate - a character's paths, talents and stats
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: state changes only through validated methods
//! - **Copy-on-write mutations**: each method works on a clone, checks every
//!   invariant, then replaces `self`. A rejected mutation leaves the
//!   aggregate untouched.
//! - **Outcome types**: mutations return what happened (see [`crate::events`])

mod error;
mod invariants;
mod ledger;
mod mutations;

pub use error::ProgressionError;
pub use invariants::InvariantViolation;
pub use ledger::{ProgressionLedger, TalentGrant};

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::rules::calculator::{self, DerivedStats};
use crate::value_objects::{Ancestry, AttributeScores, SkillRanks};

/// Progression state of one character.
///
/// # Invariants
///
/// - the key talent of every selected path is unlocked
/// - every unlocked talent has its prerequisites unlocked
/// - unlocked talents fit the talent and ancestry budgets for `level`
/// - attributes and skill ranks fit their per-value and total caps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProgression {
    character_id: CharacterId,
    level: u32,
    ancestry: Ancestry,
    #[serde(default)]
    attributes: AttributeScores,
    #[serde(default)]
    skills: SkillRanks,
    #[serde(default)]
    ledger: ProgressionLedger,
    /// Bumped on every committed change; used for compare-and-swap saves.
    #[serde(default)]
    version: u64,
}

impl CharacterProgression {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Creates an empty progression at character creation.
    pub fn new(
        character_id: CharacterId,
        level: u32,
        ancestry: Ancestry,
    ) -> Result<Self, ProgressionError> {
        if !calculator::is_valid_level(level) {
            return Err(ProgressionError::InvalidLevel);
        }
        Ok(Self {
            character_id,
            level,
            ancestry,
            attributes: AttributeScores::new(),
            skills: SkillRanks::new(),
            ledger: ProgressionLedger::new(),
            version: 0,
        })
    }

    /// Sets the stored version (used by persistence adapters).
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ancestry(&self) -> Ancestry {
        self.ancestry
    }

    pub fn attributes(&self) -> &AttributeScores {
        &self.attributes
    }

    pub fn skills(&self) -> &SkillRanks {
        &self.skills
    }

    pub fn ledger(&self) -> &ProgressionLedger {
        &self.ledger
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Marks the next committed version. Called once per saved change.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    pub fn available_talent_points(&self) -> i64 {
        calculator::available_talent_points(
            self.level,
            self.ancestry.is_singer(),
            self.ledger.unlocked_count(),
        )
    }

    pub fn available_ancestry_points(&self) -> i64 {
        calculator::available_ancestry_points(
            self.level,
            self.ancestry.is_singer(),
            self.ledger.ancestry_count(),
        )
    }

    pub fn is_radiant(&self) -> bool {
        self.ledger.selected_paths().iter().any(|p| p.is_radiant())
    }

    pub fn derived_stats(&self) -> DerivedStats {
        DerivedStats::compute(self.level, self.ancestry, &self.attributes, self.is_radiant())
    }
}
