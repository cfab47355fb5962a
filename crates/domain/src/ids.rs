use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CharacterId);

/// Stable identifier of a talent node, unique across every path's tree.
///
/// Talent ids are authored in the rule tables (e.g. `"vigilant_stance"`), so
/// they are strings rather than UUIDs. `Borrow<str>` lets maps keyed by
/// `TalentId` be queried with plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalentId(String);

impl TalentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TalentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TalentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TalentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TalentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for TalentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TalentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn character_ids_are_unique() {
        assert_ne!(CharacterId::new(), CharacterId::new());
    }

    #[test]
    fn talent_id_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(TalentId::new("vigilant_stance"), 1);
        assert_eq!(map.get("vigilant_stance"), Some(&1));
        assert_eq!(TalentId::from("practiced_kata"), "practiced_kata");
    }

    #[test]
    fn talent_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&TalentId::new("erudition")).unwrap();
        assert_eq!(json, "\"erudition\"");
    }
}
