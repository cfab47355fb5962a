//! Outcomes of progression mutations

use serde::{Deserialize, Serialize};

use crate::entities::PathId;
use crate::ids::TalentId;
use crate::value_objects::{Attribute, Skill};

/// A path was added to the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSelected {
    pub path: PathId,
    pub key_talent: TalentId,
    pub as_starting: bool,
    /// Skill that received the starting path's free rank.
    pub starting_skill: Option<Skill>,
    /// Singer key talent granted alongside a Singer's first path.
    pub ancestry_bonus: Option<TalentId>,
    pub advisories: Vec<String>,
}

/// A path and every talent still unlocked in it were removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRemoved {
    pub path: PathId,
    /// Refunded talents, deepest first, ending with the key talent.
    pub refunded: Vec<TalentId>,
    pub was_starting: bool,
    pub revoked_skill: Option<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentUnlocked {
    pub talent_id: TalentId,
    pub path: PathId,
    pub ancestry: bool,
    /// Narrative requirements the user should confirm.
    pub advisories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentRefunded {
    pub talent_id: TalentId,
    pub path: PathId,
    pub ancestry: bool,
}

/// The whole build was cleared so a new starting path can be chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReset {
    pub previous_starting_path: PathId,
    pub cleared_paths: Vec<PathId>,
    pub cleared_talents: Vec<TalentId>,
    pub revoked_skill: Option<Skill>,
}

/// Outcome of assigning an attribute, skill rank or level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatChange {
    Attribute { attribute: Attribute, from: u8, to: u8 },
    Skill { skill: Skill, from: u8, to: u8 },
    Level { from: u32, to: u32 },
    Unchanged,
}
