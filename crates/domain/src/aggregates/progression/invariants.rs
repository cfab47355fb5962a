//! Invariants checked before every commit.
//!
//! A violation here means the mutation logic let something through that it
//! should have rejected. It is reported as its own error class rather than
//! being clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CharacterProgression;
use crate::entities::PathId;
use crate::ids::TalentId;
use crate::rules::{calculator, RuleBook};
use crate::value_objects::{Attribute, Skill};

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvariantViolation {
    #[error("level must be between 1 and {}", calculator::MAX_LEVEL)]
    InvalidLevel,

    #[error("starting path {path} is not among selected paths")]
    StartingPathNotSelected { path: PathId },

    #[error("key talent {talent_id} of selected path {path} is not unlocked")]
    KeyTalentMissing { path: PathId, talent_id: TalentId },

    #[error("unknown talent {talent_id} unlocked")]
    UnknownTalent { talent_id: TalentId },

    #[error("subclass header {talent_id} is unlocked")]
    SubclassUnlocked { talent_id: TalentId },

    #[error("talent {talent_id} belongs to unselected path {path}")]
    TalentOutsideSelectedPaths { talent_id: TalentId, path: PathId },

    #[error("talent {talent_id} is missing prerequisite {prerequisite}")]
    DanglingPrerequisite {
        talent_id: TalentId,
        prerequisite: TalentId,
    },

    #[error("{unlocked} talents unlocked, budget is {max}")]
    TalentBudgetExceeded { unlocked: usize, max: u32 },

    #[error("{unlocked} ancestry talents unlocked, budget is {max}")]
    AncestryBudgetExceeded { unlocked: usize, max: u32 },

    #[error("{attribute} is {value}, cap is {cap}")]
    AttributeCapExceeded {
        attribute: Attribute,
        value: u8,
        cap: u8,
    },

    #[error("attribute total {total} exceeds {cap}")]
    AttributeTotalExceeded { total: u32, cap: u32 },

    #[error("{skill} rank {rank} exceeds {cap}")]
    SkillCapExceeded { skill: Skill, rank: u8, cap: u8 },

    #[error("skill rank total {total} exceeds {cap}")]
    SkillTotalExceeded { total: u32, cap: u32 },
}

impl CharacterProgression {
    /// Checks every invariant, returning the first violation found.
    pub fn check_invariants(&self, rules: &RuleBook) -> Result<(), InvariantViolation> {
        if !calculator::is_valid_level(self.level()) {
            return Err(InvariantViolation::InvalidLevel);
        }
        self.check_paths(rules)?;
        self.check_talents(rules)?;
        self.check_budgets()?;
        self.check_stats()
    }

    fn check_paths(&self, rules: &RuleBook) -> Result<(), InvariantViolation> {
        let ledger = self.ledger();
        if let Some(path) = ledger.starting_path() {
            if !ledger.has_path(path) {
                return Err(InvariantViolation::StartingPathNotSelected { path });
            }
        }
        for &path in ledger.selected_paths() {
            // Unknown paths cannot be selected, so a missing tree is skipped here.
            let Ok(tree) = rules.tree(path) else { continue };
            if !ledger.is_unlocked(tree.key_talent().as_str()) {
                return Err(InvariantViolation::KeyTalentMissing {
                    path,
                    talent_id: tree.key_talent().clone(),
                });
            }
        }
        Ok(())
    }

    fn check_talents(&self, rules: &RuleBook) -> Result<(), InvariantViolation> {
        let ledger = self.ledger();
        for (talent_id, _) in ledger.unlocked_talents() {
            let Ok(tree) = rules.tree_for_talent(talent_id.as_str()) else {
                return Err(InvariantViolation::UnknownTalent {
                    talent_id: talent_id.clone(),
                });
            };
            if tree.node(talent_id.as_str()).is_some_and(|n| n.is_subclass) {
                return Err(InvariantViolation::SubclassUnlocked {
                    talent_id: talent_id.clone(),
                });
            }
            if !ledger.has_path(tree.path()) {
                return Err(InvariantViolation::TalentOutsideSelectedPaths {
                    talent_id: talent_id.clone(),
                    path: tree.path(),
                });
            }
            if let Some(missing) = tree
                .prerequisites_of(talent_id.as_str())
                .into_iter()
                .find(|p| !ledger.is_unlocked(p.as_str()))
            {
                return Err(InvariantViolation::DanglingPrerequisite {
                    talent_id: talent_id.clone(),
                    prerequisite: missing.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_budgets(&self) -> Result<(), InvariantViolation> {
        let singer = self.ancestry().is_singer();
        let ledger = self.ledger();
        let max = calculator::max_talents(self.level(), singer);
        if ledger.unlocked_count() as u64 > u64::from(max) {
            return Err(InvariantViolation::TalentBudgetExceeded {
                unlocked: ledger.unlocked_count(),
                max,
            });
        }
        let max = calculator::max_ancestry_talents(self.level(), singer);
        if ledger.ancestry_count() as u64 > u64::from(max) {
            return Err(InvariantViolation::AncestryBudgetExceeded {
                unlocked: ledger.ancestry_count(),
                max,
            });
        }
        Ok(())
    }

    fn check_stats(&self) -> Result<(), InvariantViolation> {
        let level = self.level();
        let cap = calculator::max_modifier_per_attribute(level);
        if let Some((attribute, value)) = self.attributes().iter().find(|(_, v)| *v > cap) {
            return Err(InvariantViolation::AttributeCapExceeded {
                attribute,
                value,
                cap,
            });
        }
        let cap = calculator::max_attribute_points(level);
        if self.attributes().total() > cap {
            return Err(InvariantViolation::AttributeTotalExceeded {
                total: self.attributes().total(),
                cap,
            });
        }
        let cap = calculator::max_rank_per_skill(level);
        if let Some((skill, rank)) = self.skills().iter().find(|(_, r)| *r > cap) {
            return Err(InvariantViolation::SkillCapExceeded { skill, rank, cap });
        }
        let cap = calculator::max_total_skill_ranks(level);
        if self.skills().total() > cap {
            return Err(InvariantViolation::SkillTotalExceeded {
                total: self.skills().total(),
                cap,
            });
        }
        Ok(())
    }
}
