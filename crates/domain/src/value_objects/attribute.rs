//! Attribute value objects - the six core attributes and a character's scores.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Core character attributes.
///
/// Attributes pair up into the three defenses: Strength/Speed (physical),
/// Intellect/Willpower (cognitive) and Awareness/Presence (spiritual).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Speed,
    Intellect,
    Willpower,
    Awareness,
    Presence,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Self::Strength,
        Self::Speed,
        Self::Intellect,
        Self::Willpower,
        Self::Awareness,
        Self::Presence,
    ];

    /// Returns the snake_case identifier (e.g., "strength").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Speed => "speed",
            Self::Intellect => "intellect",
            Self::Willpower => "willpower",
            Self::Awareness => "awareness",
            Self::Presence => "presence",
        }
    }

    /// Returns the display name (e.g., "Strength").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Speed => "Speed",
            Self::Intellect => "Intellect",
            Self::Willpower => "Willpower",
            Self::Awareness => "Awareness",
            Self::Presence => "Presence",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" | "str" => Ok(Self::Strength),
            "speed" | "spd" => Ok(Self::Speed),
            "intellect" | "int" => Ok(Self::Intellect),
            "willpower" | "wil" => Ok(Self::Willpower),
            "awareness" | "awa" => Ok(Self::Awareness),
            "presence" | "pre" => Ok(Self::Presence),
            _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
        }
    }
}

/// A character's raw attribute values. Missing entries read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeScores(BTreeMap<Attribute, u8>);

impl AttributeScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        self.0.get(&attribute).copied().unwrap_or(0)
    }

    pub fn set(&mut self, attribute: Attribute, value: u8) {
        if value == 0 {
            self.0.remove(&attribute);
        } else {
            self.0.insert(attribute, value);
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, attribute: Attribute, value: u8) -> Self {
        self.set(attribute, value);
        self
    }

    /// Sum of all attribute values.
    pub fn total(&self) -> u32 {
        self.0.values().map(|v| u32::from(*v)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        self.0.iter().map(|(a, v)| (*a, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_names_and_abbreviations() {
        assert_eq!(Attribute::from_str("Strength"), Ok(Attribute::Strength));
        assert_eq!(Attribute::from_str("wil"), Ok(Attribute::Willpower));
        assert!(Attribute::from_str("luck").is_err());
    }

    #[test]
    fn scores_default_to_zero_and_total() {
        let scores = AttributeScores::new()
            .with(Attribute::Strength, 3)
            .with(Attribute::Presence, 2);
        assert_eq!(scores.get(Attribute::Speed), 0);
        assert_eq!(scores.get(Attribute::Strength), 3);
        assert_eq!(scores.total(), 5);
    }

    #[test]
    fn setting_zero_removes_entry() {
        let mut scores = AttributeScores::new().with(Attribute::Awareness, 2);
        scores.set(Attribute::Awareness, 0);
        assert_eq!(scores, AttributeScores::new());
    }
}
