//! Skill value objects - ordinary and surge skills, and a character's ranks.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::DomainError;

/// Every rankable skill, including the ten Radiant surge skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    // Physical
    Agility,
    Athletics,
    HeavyWeaponry,
    LightWeaponry,
    Stealth,
    Thievery,
    // Cognitive
    Crafting,
    Deduction,
    Discipline,
    Intimidation,
    Lore,
    Medicine,
    // Spiritual
    Deception,
    Insight,
    Leadership,
    Perception,
    Persuasion,
    Survival,
    // Surges
    Adhesion,
    Gravitation,
    Division,
    Abrasion,
    Progression,
    Illumination,
    Transformation,
    Transportation,
    Cohesion,
    Tension,
}

impl Skill {
    pub const ALL: [Skill; 28] = [
        Self::Agility,
        Self::Athletics,
        Self::HeavyWeaponry,
        Self::LightWeaponry,
        Self::Stealth,
        Self::Thievery,
        Self::Crafting,
        Self::Deduction,
        Self::Discipline,
        Self::Intimidation,
        Self::Lore,
        Self::Medicine,
        Self::Deception,
        Self::Insight,
        Self::Leadership,
        Self::Perception,
        Self::Persuasion,
        Self::Survival,
        Self::Adhesion,
        Self::Gravitation,
        Self::Division,
        Self::Abrasion,
        Self::Progression,
        Self::Illumination,
        Self::Transformation,
        Self::Transportation,
        Self::Cohesion,
        Self::Tension,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agility => "agility",
            Self::Athletics => "athletics",
            Self::HeavyWeaponry => "heavy_weaponry",
            Self::LightWeaponry => "light_weaponry",
            Self::Stealth => "stealth",
            Self::Thievery => "thievery",
            Self::Crafting => "crafting",
            Self::Deduction => "deduction",
            Self::Discipline => "discipline",
            Self::Intimidation => "intimidation",
            Self::Lore => "lore",
            Self::Medicine => "medicine",
            Self::Deception => "deception",
            Self::Insight => "insight",
            Self::Leadership => "leadership",
            Self::Perception => "perception",
            Self::Persuasion => "persuasion",
            Self::Survival => "survival",
            Self::Adhesion => "adhesion",
            Self::Gravitation => "gravitation",
            Self::Division => "division",
            Self::Abrasion => "abrasion",
            Self::Progression => "progression",
            Self::Illumination => "illumination",
            Self::Transformation => "transformation",
            Self::Transportation => "transportation",
            Self::Cohesion => "cohesion",
            Self::Tension => "tension",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Athletics => "Athletics",
            Self::HeavyWeaponry => "Heavy Weaponry",
            Self::LightWeaponry => "Light Weaponry",
            Self::Stealth => "Stealth",
            Self::Thievery => "Thievery",
            Self::Crafting => "Crafting",
            Self::Deduction => "Deduction",
            Self::Discipline => "Discipline",
            Self::Intimidation => "Intimidation",
            Self::Lore => "Lore",
            Self::Medicine => "Medicine",
            Self::Deception => "Deception",
            Self::Insight => "Insight",
            Self::Leadership => "Leadership",
            Self::Perception => "Perception",
            Self::Persuasion => "Persuasion",
            Self::Survival => "Survival",
            Self::Adhesion => "Adhesion",
            Self::Gravitation => "Gravitation",
            Self::Division => "Division",
            Self::Abrasion => "Abrasion",
            Self::Progression => "Progression",
            Self::Illumination => "Illumination",
            Self::Transformation => "Transformation",
            Self::Transportation => "Transportation",
            Self::Cohesion => "Cohesion",
            Self::Tension => "Tension",
        }
    }

    /// The attribute a skill test with this skill adds.
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::Agility | Self::Stealth | Self::LightWeaponry | Self::Thievery => Attribute::Speed,
            Self::Athletics | Self::HeavyWeaponry => Attribute::Strength,
            Self::Crafting | Self::Deduction | Self::Lore | Self::Medicine => Attribute::Intellect,
            Self::Discipline | Self::Intimidation => Attribute::Willpower,
            Self::Insight | Self::Perception | Self::Survival => Attribute::Awareness,
            Self::Deception | Self::Leadership | Self::Persuasion => Attribute::Presence,
            Self::Adhesion | Self::Cohesion => Attribute::Presence,
            Self::Gravitation | Self::Division | Self::Transformation => Attribute::Awareness,
            Self::Abrasion | Self::Transportation => Attribute::Speed,
            Self::Progression | Self::Illumination => Attribute::Awareness,
            Self::Tension => Attribute::Strength,
        }
    }

    pub fn is_surge(&self) -> bool {
        matches!(
            self,
            Self::Adhesion
                | Self::Gravitation
                | Self::Division
                | Self::Abrasion
                | Self::Progression
                | Self::Illumination
                | Self::Transformation
                | Self::Transportation
                | Self::Cohesion
                | Self::Tension
        )
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|skill| skill.as_str() == normalized)
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

/// A character's skill ranks. Missing entries read as rank 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillRanks(BTreeMap<Skill, u8>);

impl SkillRanks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, skill: Skill) -> u8 {
        self.0.get(&skill).copied().unwrap_or(0)
    }

    pub fn set(&mut self, skill: Skill, rank: u8) {
        if rank == 0 {
            self.0.remove(&skill);
        } else {
            self.0.insert(skill, rank);
        }
    }

    pub fn with(mut self, skill: Skill, rank: u8) -> Self {
        self.set(skill, rank);
        self
    }

    /// Sum of all ranks across every skill.
    pub fn total(&self) -> u32 {
        self.0.values().map(|v| u32::from(*v)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, u8)> + '_ {
        self.0.iter().map(|(s, r)| (*s, *r))
    }
}
