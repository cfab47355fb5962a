//! Path entities - the closed set of progression tracks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::TalentId;
use crate::value_objects::{Attribute, Skill};

/// Family a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    Heroic,
    Radiant,
    Singer,
}

/// Stable path identifier: 6 Heroic, 9 Radiant, 1 Singer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathId {
    // Heroic
    Agent,
    Envoy,
    Hunter,
    Leader,
    Scholar,
    Warrior,
    // Radiant
    Windrunner,
    Skybreaker,
    Dustbringer,
    Edgedancer,
    Truthwatcher,
    Lightweaver,
    Elsecaller,
    Willshaper,
    Stoneward,
    // Ancestry
    Singer,
}

impl PathId {
    pub const ALL: [PathId; 16] = [
        Self::Agent,
        Self::Envoy,
        Self::Hunter,
        Self::Leader,
        Self::Scholar,
        Self::Warrior,
        Self::Windrunner,
        Self::Skybreaker,
        Self::Dustbringer,
        Self::Edgedancer,
        Self::Truthwatcher,
        Self::Lightweaver,
        Self::Elsecaller,
        Self::Willshaper,
        Self::Stoneward,
        Self::Singer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Envoy => "envoy",
            Self::Hunter => "hunter",
            Self::Leader => "leader",
            Self::Scholar => "scholar",
            Self::Warrior => "warrior",
            Self::Windrunner => "windrunner",
            Self::Skybreaker => "skybreaker",
            Self::Dustbringer => "dustbringer",
            Self::Edgedancer => "edgedancer",
            Self::Truthwatcher => "truthwatcher",
            Self::Lightweaver => "lightweaver",
            Self::Elsecaller => "elsecaller",
            Self::Willshaper => "willshaper",
            Self::Stoneward => "stoneward",
            Self::Singer => "singer",
        }
    }

    pub fn kind(&self) -> PathKind {
        match self {
            Self::Agent | Self::Envoy | Self::Hunter | Self::Leader | Self::Scholar | Self::Warrior => {
                PathKind::Heroic
            }
            Self::Singer => PathKind::Singer,
            _ => PathKind::Radiant,
        }
    }

    pub fn is_heroic(&self) -> bool {
        self.kind() == PathKind::Heroic
    }

    pub fn is_radiant(&self) -> bool {
        self.kind() == PathKind::Radiant
    }

    pub fn is_singer(&self) -> bool {
        self.kind() == PathKind::Singer
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|path| path.as_str() == normalized)
            .ok_or_else(|| DomainError::not_found("path", s))
    }
}

/// Descriptive metadata for a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    pub path: PathId,
    pub name: String,
    pub description: String,
    pub key_talent: TalentId,
    pub recommended_attributes: Vec<Attribute>,
    pub recommended_skills: Vec<Skill>,
    /// Skill granted one rank when this path is taken as the starting path.
    pub starting_path_skill: Option<Skill>,
}
