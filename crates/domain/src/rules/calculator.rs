//! Derived-stat calculator.
//!
//! Pure functions of level, ancestry and raw attribute values. Inputs are
//! assumed validated (`1..=MAX_LEVEL`); bounds are enforced by the progression
//! aggregate before values reach here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{Ancestry, Attribute, AttributeScores};

// ----------------------------------------------------------------------------
// Level caps
// ----------------------------------------------------------------------------

/// Highest level a character can reach, epic levels past 20 included.
pub const MAX_LEVEL: u32 = 30;

/// Whether `level` is inside `1..=MAX_LEVEL`.
pub fn is_valid_level(level: u32) -> bool {
    (1..=MAX_LEVEL).contains(&level)
}

pub fn max_attribute_points(level: u32) -> u32 {
    12 + (level / 3).min(6)
}

pub fn max_modifier_per_attribute(level: u32) -> u8 {
    match level {
        0..=1 => 3,
        2..=5 => 4,
        _ => 5,
    }
}

pub fn max_total_skill_ranks(level: u32) -> u32 {
    2 + level.min(20) * 2 + level.saturating_sub(20)
}

pub fn max_rank_per_skill(level: u32) -> u8 {
    let rank = level.saturating_sub(1) / 5 + 2;
    // Bounded by 5 before narrowing.
    rank.min(5) as u8
}

pub fn max_ancestry_talents(level: u32, is_singer: bool) -> u32 {
    level / 5 + if is_singer { 2 } else { 1 }
}

pub fn max_talents(level: u32, is_singer: bool) -> u32 {
    level + max_ancestry_talents(level, is_singer)
}

/// Remaining talent points. Negative when a build exceeds its budget.
pub fn available_talent_points(level: u32, is_singer: bool, unlocked_count: usize) -> i64 {
    i64::from(max_talents(level, is_singer)) - unlocked_count as i64
}

/// Remaining ancestry talent points.
pub fn available_ancestry_points(level: u32, is_singer: bool, ancestry_count: usize) -> i64 {
    i64::from(max_ancestry_talents(level, is_singer)) - ancestry_count as i64
}

// ----------------------------------------------------------------------------
// Attribute bands
// ----------------------------------------------------------------------------

/// Band index for an attribute value: `[0, 1-2, 3-4, 5-6, 7-8, 9+]`.
fn band(value: u8) -> usize {
    match value {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        7..=8 => 4,
        _ => 5,
    }
}

const MOVEMENT_FEET: [u32; 6] = [20, 25, 30, 40, 60, 80];
const LIFTING_LB: [u32; 6] = [100, 200, 500, 1000, 5000, 10000];
const CARRYING_LB: [u32; 6] = [50, 100, 250, 500, 2500, 5000];
const RECOVERY_DICE: [RecoveryDie; 6] = [
    RecoveryDie::D4,
    RecoveryDie::D6,
    RecoveryDie::D8,
    RecoveryDie::D10,
    RecoveryDie::D12,
    RecoveryDie::D20,
];
const SENSES: [SensesRange; 6] = [
    SensesRange::Feet(5),
    SensesRange::Feet(10),
    SensesRange::Feet(20),
    SensesRange::Feet(50),
    SensesRange::Feet(100),
    SensesRange::Unlimited,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryDie {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl RecoveryDie {
    pub fn sides(&self) -> u8 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
        }
    }
}

impl fmt::Display for RecoveryDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensesRange {
    Feet(u32),
    Unlimited,
}

/// Movement in feet, keyed by Speed.
pub fn movement(speed: u8) -> u32 {
    MOVEMENT_FEET[band(speed)]
}

/// Recovery die, keyed by Willpower.
pub fn recovery_die(willpower: u8) -> RecoveryDie {
    RECOVERY_DICE[band(willpower)]
}

/// Senses range, keyed by Awareness.
pub fn senses_range(awareness: u8) -> SensesRange {
    SENSES[band(awareness)]
}

pub fn lifting_capacity(strength: u8) -> u32 {
    LIFTING_LB[band(strength)]
}

pub fn carrying_capacity(strength: u8) -> u32 {
    CARRYING_LB[band(strength)]
}

// ----------------------------------------------------------------------------
// Health and defenses
// ----------------------------------------------------------------------------

/// Maximum health: `10 + Strength` at level 1, then per-level gains.
///
/// Levels 6, 11 and 16 add Strength again on top of their tier's gain.
pub fn max_health(level: u32, strength: u8) -> u32 {
    let strength = u32::from(strength);
    let mut health = 10 + strength;
    for lvl in 2..=level {
        health += match lvl {
            2..=5 => 5,
            6..=10 => 4,
            11..=15 => 3,
            16..=20 => 2,
            _ => 1,
        };
        if matches!(lvl, 6 | 11 | 16) {
            health += strength;
        }
    }
    health
}

pub fn focus(willpower: u8) -> u32 {
    2 + u32::from(willpower)
}

/// Investiture is only available to Radiants.
pub fn investiture(is_radiant: bool, awareness: u8, presence: u8) -> u32 {
    if is_radiant {
        2 + u32::from(awareness.max(presence))
    } else {
        0
    }
}

/// Every derived number shown on a character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_attribute_points: u32,
    pub max_modifier_per_attribute: u8,
    pub max_total_skill_ranks: u32,
    pub max_rank_per_skill: u8,
    pub max_talents: u32,
    pub max_ancestry_talents: u32,
    pub max_health: u32,
    pub movement: u32,
    pub recovery_die: RecoveryDie,
    pub senses_range: SensesRange,
    pub lifting_capacity: u32,
    pub carrying_capacity: u32,
    pub physical_defense: u32,
    pub cognitive_defense: u32,
    pub spiritual_defense: u32,
    pub focus: u32,
    pub investiture: u32,
}

impl DerivedStats {
    pub fn compute(
        level: u32,
        ancestry: Ancestry,
        attributes: &AttributeScores,
        is_radiant: bool,
    ) -> Self {
        let attr = |a: Attribute| attributes.get(a);
        let defense = |a: Attribute, b: Attribute| 10 + u32::from(attr(a)) + u32::from(attr(b));
        let singer = ancestry.is_singer();
        Self {
            max_attribute_points: max_attribute_points(level),
            max_modifier_per_attribute: max_modifier_per_attribute(level),
            max_total_skill_ranks: max_total_skill_ranks(level),
            max_rank_per_skill: max_rank_per_skill(level),
            max_talents: max_talents(level, singer),
            max_ancestry_talents: max_ancestry_talents(level, singer),
            max_health: max_health(level, attr(Attribute::Strength)),
            movement: movement(attr(Attribute::Speed)),
            recovery_die: recovery_die(attr(Attribute::Willpower)),
            senses_range: senses_range(attr(Attribute::Awareness)),
            lifting_capacity: lifting_capacity(attr(Attribute::Strength)),
            carrying_capacity: carrying_capacity(attr(Attribute::Strength)),
            physical_defense: defense(Attribute::Strength, Attribute::Speed),
            cognitive_defense: defense(Attribute::Intellect, Attribute::Willpower),
            spiritual_defense: defense(Attribute::Awareness, Attribute::Presence),
            focus: focus(attr(Attribute::Willpower)),
            investiture: investiture(
                is_radiant,
                attr(Attribute::Awareness),
                attr(Attribute::Presence),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_caps() {
        assert_eq!(max_attribute_points(1), 12);
        assert_eq!(max_attribute_points(3), 13);
        assert_eq!(max_attribute_points(18), 18);
        assert_eq!(max_attribute_points(30), 18);
        assert_eq!(max_modifier_per_attribute(1), 3);
        assert_eq!(max_modifier_per_attribute(5), 4);
        assert_eq!(max_modifier_per_attribute(6), 5);
    }

    #[test]
    fn skill_caps() {
        assert_eq!(max_total_skill_ranks(1), 4);
        assert_eq!(max_total_skill_ranks(20), 42);
        assert_eq!(max_total_skill_ranks(23), 45);
        assert_eq!(max_rank_per_skill(1), 2);
        assert_eq!(max_rank_per_skill(6), 3);
        assert_eq!(max_rank_per_skill(16), 5);
        assert_eq!(max_rank_per_skill(30), 5);
    }

    #[test]
    fn talent_budgets_for_level_ten_singer() {
        assert_eq!(max_ancestry_talents(10, true), 4);
        assert_eq!(max_talents(10, true), 14);
        assert_eq!(max_talents(1, false), 2);
        assert_eq!(available_talent_points(1, false, 3), -1);
        assert_eq!(available_ancestry_points(10, true, 1), 3);
    }

    #[test]
    fn band_breakpoints() {
        assert_eq!(movement(0), 20);
        assert_eq!(movement(2), 25);
        assert_eq!(movement(3), 30);
        assert_eq!(movement(9), 80);
        assert_eq!(recovery_die(4), RecoveryDie::D8);
        assert_eq!(recovery_die(12), RecoveryDie::D20);
        assert_eq!(senses_range(8), SensesRange::Feet(100));
        assert_eq!(senses_range(9), SensesRange::Unlimited);
        assert_eq!(lifting_capacity(5), 1000);
        assert_eq!(carrying_capacity(7), 2500);
    }

    #[test]
    fn health_progression() {
        assert_eq!(max_health(1, 2), 12);
        assert_eq!(max_health(5, 2), 32);
        // level 6 adds 4 + strength
        assert_eq!(max_health(6, 2), 38);
        assert_eq!(max_health(10, 0), 10 + 20 + 20);
        assert_eq!(max_health(21, 0), 10 + 20 + 20 + 15 + 10 + 1);
    }

    #[test]
    fn derived_stats_for_radiant() {
        let attributes = AttributeScores::new()
            .with(Attribute::Strength, 2)
            .with(Attribute::Speed, 1)
            .with(Attribute::Awareness, 3)
            .with(Attribute::Presence, 1)
            .with(Attribute::Willpower, 2);
        let stats = DerivedStats::compute(1, Ancestry::Human, &attributes, true);
        assert_eq!(stats.physical_defense, 13);
        assert_eq!(stats.spiritual_defense, 14);
        assert_eq!(stats.focus, 4);
        assert_eq!(stats.investiture, 5);
        assert_eq!(stats.recovery_die.to_string(), "d6");
        let mundane = DerivedStats::compute(1, Ancestry::Human, &attributes, false);
        assert_eq!(mundane.investiture, 0);
    }
}
