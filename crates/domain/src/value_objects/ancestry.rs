use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Character ancestry. Singers get an extra ancestry talent and the Singer path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ancestry {
    #[default]
    Human,
    Singer,
}

impl Ancestry {
    pub fn is_singer(&self) -> bool {
        matches!(self, Self::Singer)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Singer => "singer",
        }
    }
}

impl fmt::Display for Ancestry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ancestry {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "singer" => Ok(Self::Singer),
            _ => Err(DomainError::parse(format!("Unknown ancestry: {}", s))),
        }
    }
}
