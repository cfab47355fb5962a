//! Dependency graph resolver.
//!
//! Stateless: every decision is computed from the rule book and the character
//! passed in. A [`Decision`] lists every reason found, not just the first, so a
//! caller can render all of them at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{calculator, RuleBook, TalentTree};
use crate::aggregates::CharacterProgression;
use crate::entities::PathId;
use crate::error::DomainError;
use crate::ids::TalentId;
use crate::value_objects::{Ancestry, Attribute, Skill};

/// How narrative ("other") requirements are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementMode {
    /// Surfaced as advisories for the user to confirm.
    #[default]
    Advisory,
    /// Any narrative requirement blocks unlock.
    Strict,
}

impl FromStr for RequirementMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advisory" | "false" | "0" | "" => Ok(Self::Advisory),
            "strict" | "true" | "1" => Ok(Self::Strict),
            _ => Err(DomainError::parse(format!("Unknown requirement mode: {}", s))),
        }
    }
}

/// Which talent-point pool a talent draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointPool {
    Talent,
    Ancestry,
}

impl fmt::Display for PointPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Talent => f.write_str("talent"),
            Self::Ancestry => f.write_str("ancestry talent"),
        }
    }
}

/// Why an unlock is being attempted, which decides the budget rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockKind {
    /// An ordinary purchase from the talent (or ancestry) pool.
    Purchase { ancestry: bool },
    /// Key talent of the starting path; free.
    StartingKey,
    /// Key talent of a multiclass path; costs a talent point.
    MulticlassKey,
    /// Singer key talent granted alongside the first path; ancestry pool.
    AncestryBonusKey,
}

impl UnlockKind {
    pub fn is_ancestry(&self) -> bool {
        matches!(
            self,
            Self::Purchase { ancestry: true } | Self::AncestryBonusKey
        )
    }

    fn selects_path(&self) -> bool {
        !matches!(self, Self::Purchase { .. })
    }
}

/// A single reason an unlock or refund is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockingReason {
    SubclassHeader { talent_id: TalentId },
    AlreadyUnlocked { talent_id: TalentId },
    NotUnlocked { talent_id: TalentId },
    PathNotSelected { path: PathId },
    AncestryRequired { path: PathId, ancestry: Ancestry },
    MissingPrerequisite { talent_id: TalentId },
    AttributeTooLow { attribute: Attribute, required: u8, actual: u8 },
    SkillTooLow { skill: Skill, required: u8, actual: u8 },
    LevelTooLow { required: u32, actual: u32 },
    UnverifiedCondition { condition: String },
    NoPoints { pool: PointPool, available: i64 },
    UnlockedDependents { dependents: Vec<TalentId> },
    StartingPathKey { path: PathId },
    KeyTalentOfSelectedPath { path: PathId },
}

impl fmt::Display for BlockingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubclassHeader { talent_id } => write!(f, "{} is a subclass header", talent_id),
            Self::AlreadyUnlocked { talent_id } => write!(f, "{} is already unlocked", talent_id),
            Self::NotUnlocked { talent_id } => write!(f, "{} is not unlocked", talent_id),
            Self::PathNotSelected { path } => write!(f, "path {} is not selected", path),
            Self::AncestryRequired { path, ancestry } => {
                write!(f, "path {} requires {} ancestry", path, ancestry)
            }
            Self::MissingPrerequisite { talent_id } => {
                write!(f, "requires talent {}", talent_id)
            }
            Self::AttributeTooLow {
                attribute,
                required,
                actual,
            } => write!(f, "requires {} {} (have {})", attribute, required, actual),
            Self::SkillTooLow {
                skill,
                required,
                actual,
            } => write!(f, "requires {} rank {} (have {})", skill, required, actual),
            Self::LevelTooLow { required, actual } => {
                write!(f, "requires level {} (have {})", required, actual)
            }
            Self::UnverifiedCondition { condition } => write!(f, "unverified: {}", condition),
            Self::NoPoints { pool, .. } => write!(f, "no {} points available", pool),
            Self::UnlockedDependents { dependents } => {
                let names: Vec<&str> = dependents.iter().map(TalentId::as_str).collect();
                write!(f, "blocked by unlocked dependents: [{}]", names.join(", "))
            }
            Self::StartingPathKey { path } => write!(
                f,
                "comes from starting path {}; change starting path instead",
                path
            ),
            Self::KeyTalentOfSelectedPath { path } => {
                write!(f, "key talent of selected path {}; remove the path instead", path)
            }
        }
    }
}

/// Outcome of a `can_unlock` / `can_refund` query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub blocking_reasons: Vec<BlockingReason>,
    /// Narrative requirements to confirm with the user; never blocking here.
    pub advisories: Vec<String>,
}

impl Decision {
    fn from_parts(blocking_reasons: Vec<BlockingReason>, advisories: Vec<String>) -> Self {
        Self {
            allowed: blocking_reasons.is_empty(),
            blocking_reasons,
            advisories,
        }
    }

    /// True when the only thing in the way is an empty point pool.
    pub fn only_points_missing(&self) -> bool {
        !self.allowed
            && self
                .blocking_reasons
                .iter()
                .all(|r| matches!(r, BlockingReason::NoPoints { .. }))
    }
}

/// Answers unlock/refund legality against a [`RuleBook`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    rules: &'a RuleBook,
    mode: RequirementMode,
}

impl<'a> Resolver<'a> {
    pub fn new(rules: &'a RuleBook, mode: RequirementMode) -> Self {
        Self { rules, mode }
    }

    pub fn rules(&self) -> &'a RuleBook {
        self.rules
    }

    pub fn mode(&self) -> RequirementMode {
        self.mode
    }

    /// May `talent_id` be unlocked now, for the given reason?
    pub fn can_unlock(
        &self,
        character: &CharacterProgression,
        talent_id: &str,
        kind: UnlockKind,
    ) -> Result<Decision, DomainError> {
        let tree = self.rules.tree_for_talent(talent_id)?;
        let node = tree
            .node(talent_id)
            .ok_or_else(|| DomainError::not_found("talent", talent_id))?;
        let ledger = character.ledger();
        let mut reasons = Vec::new();
        let mut advisories = Vec::new();

        if node.is_subclass {
            reasons.push(BlockingReason::SubclassHeader {
                talent_id: node.id.clone(),
            });
        }
        if ledger.is_unlocked(talent_id) {
            reasons.push(BlockingReason::AlreadyUnlocked {
                talent_id: node.id.clone(),
            });
        }
        let path = tree.path();
        if !kind.selects_path() && !ledger.has_path(path) {
            reasons.push(BlockingReason::PathNotSelected { path });
        }
        if path.is_singer() && !character.ancestry().is_singer() {
            reasons.push(BlockingReason::AncestryRequired {
                path,
                ancestry: Ancestry::Singer,
            });
        }

        for prerequisite in tree.prerequisites_of(talent_id) {
            if !ledger.is_unlocked(prerequisite.as_str()) {
                reasons.push(BlockingReason::MissingPrerequisite {
                    talent_id: prerequisite.clone(),
                });
            }
        }

        if let Some(req) = &node.requirements {
            if let Some(attr) = req.attribute {
                let actual = character.attributes().get(attr.attribute);
                if actual < attr.min {
                    reasons.push(BlockingReason::AttributeTooLow {
                        attribute: attr.attribute,
                        required: attr.min,
                        actual,
                    });
                }
            }
            if let Some(skill) = req.skill {
                let actual = character.skills().get(skill.skill);
                if actual < skill.min {
                    reasons.push(BlockingReason::SkillTooLow {
                        skill: skill.skill,
                        required: skill.min,
                        actual,
                    });
                }
            }
            if let Some(level) = req.level {
                if character.level() < level {
                    reasons.push(BlockingReason::LevelTooLow {
                        required: level,
                        actual: character.level(),
                    });
                }
            }
            for condition in &req.other {
                match self.mode {
                    RequirementMode::Advisory => advisories.push(condition.clone()),
                    RequirementMode::Strict => reasons.push(BlockingReason::UnverifiedCondition {
                        condition: condition.clone(),
                    }),
                }
            }
        }

        reasons.extend(self.budget_reasons(character, kind));
        Ok(Decision::from_parts(reasons, advisories))
    }

    /// May `talent_id` be refunded now?
    pub fn can_refund(
        &self,
        character: &CharacterProgression,
        talent_id: &str,
    ) -> Result<Decision, DomainError> {
        let tree = self.rules.tree_for_talent(talent_id)?;
        let ledger = character.ledger();
        let mut reasons = Vec::new();

        if !ledger.is_unlocked(talent_id) {
            reasons.push(BlockingReason::NotUnlocked {
                talent_id: TalentId::new(talent_id),
            });
            return Ok(Decision::from_parts(reasons, Vec::new()));
        }

        let dependents = unlocked_dependents(tree, talent_id, character);
        if !dependents.is_empty() {
            reasons.push(BlockingReason::UnlockedDependents { dependents });
        }

        let path = tree.path();
        if tree.is_key_talent(talent_id) && ledger.has_path(path) {
            if ledger.starting_path() == Some(path) {
                reasons.push(BlockingReason::StartingPathKey { path });
            } else {
                reasons.push(BlockingReason::KeyTalentOfSelectedPath { path });
            }
        }

        Ok(Decision::from_parts(reasons, Vec::new()))
    }

    fn budget_reasons(&self, character: &CharacterProgression, kind: UnlockKind) -> Vec<BlockingReason> {
        if kind == UnlockKind::StartingKey {
            return Vec::new();
        }
        let ledger = character.ledger();
        let singer = character.ancestry().is_singer();
        let level = character.level();
        let mut reasons = Vec::new();

        if kind.is_ancestry() {
            let available =
                calculator::available_ancestry_points(level, singer, ledger.ancestry_count());
            if available <= 0 {
                reasons.push(BlockingReason::NoPoints {
                    pool: PointPool::Ancestry,
                    available,
                });
            }
        }
        let available = calculator::available_talent_points(level, singer, ledger.unlocked_count());
        if available <= 0 {
            reasons.push(BlockingReason::NoPoints {
                pool: PointPool::Talent,
                available,
            });
        }
        reasons
    }
}

/// Unlocked talents reachable forward from `talent_id`, in tree order.
pub(crate) fn unlocked_dependents(
    tree: &TalentTree,
    talent_id: &str,
    character: &CharacterProgression,
) -> Vec<TalentId> {
    tree.descendants(talent_id)
        .into_iter()
        .filter(|t| character.ledger().is_unlocked(t.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CharacterId;

    fn rules() -> std::sync::Arc<RuleBook> {
        RuleBook::standard().unwrap()
    }

    fn warrior(level: u32) -> CharacterProgression {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let mut c = CharacterProgression::new(CharacterId::new(), level, Ancestry::Human).unwrap();
        c.select_path(&resolver, PathId::Warrior, true).unwrap();
        c
    }

    #[test]
    fn subclass_header_is_never_unlockable() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let c = warrior(5);
        let header = rules
            .tree(PathId::Warrior)
            .unwrap()
            .nodes()
            .iter()
            .find(|n| n.is_subclass)
            .unwrap()
            .id
            .clone();
        let decision = resolver
            .can_unlock(&c, header.as_str(), UnlockKind::Purchase { ancestry: false })
            .unwrap();
        assert!(!decision.allowed);
        assert!(decision
            .blocking_reasons
            .contains(&BlockingReason::SubclassHeader { talent_id: header }));
    }

    #[test]
    fn missing_prerequisite_blocks_and_is_listed() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let c = warrior(5);
        let decision = resolver
            .can_unlock(&c, "flamestance", UnlockKind::Purchase { ancestry: false })
            .unwrap();
        assert!(!decision.allowed);
        assert!(decision.blocking_reasons.contains(&BlockingReason::MissingPrerequisite {
            talent_id: TalentId::new("practiced_kata")
        }));
    }

    #[test]
    fn narrative_requirements_depend_on_mode() {
        let rules = rules();
        let mut c = warrior(5);
        let advisory = Resolver::new(&rules, RequirementMode::Advisory);
        c.unlock_talent(&advisory, "practiced_kata", false).unwrap();
        c.unlock_talent(&advisory, "combat_training", false).unwrap();

        let decision = advisory
            .can_unlock(&c, "shard_training", UnlockKind::Purchase { ancestry: false })
            .unwrap();
        assert!(decision.allowed, "{:?}", decision.blocking_reasons);
        assert_eq!(decision.advisories, vec!["Access to a Shardblade or Shardplate"]);

        let strict = Resolver::new(&rules, RequirementMode::Strict);
        let decision = strict
            .can_unlock(&c, "shard_training", UnlockKind::Purchase { ancestry: false })
            .unwrap();
        assert!(!decision.allowed);
        assert!(matches!(
            decision.blocking_reasons[..],
            [BlockingReason::UnverifiedCondition { .. }]
        ));
    }

    #[test]
    fn empty_pool_is_reported_as_points() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let mut c = warrior(1);
        c.unlock_talent(&resolver, "practiced_kata", false).unwrap();
        let decision = resolver
            .can_unlock(&c, "cautious_advance", UnlockKind::Purchase { ancestry: false })
            .unwrap();
        assert!(decision.only_points_missing(), "{:?}", decision.blocking_reasons);
    }

    #[test]
    fn starting_key_is_exempt_from_budget() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let c = CharacterProgression::new(CharacterId::new(), 1, Ancestry::Human).unwrap();
        let decision = resolver
            .can_unlock(&c, "erudition", UnlockKind::StartingKey)
            .unwrap();
        assert!(decision.allowed);
    }

    #[test]
    fn refund_reports_dependents_before_key_lock() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let mut c = warrior(1);
        c.unlock_talent(&resolver, "practiced_kata", false).unwrap();
        let decision = resolver.can_refund(&c, "vigilant_stance").unwrap();
        assert_eq!(
            decision.blocking_reasons,
            vec![
                BlockingReason::UnlockedDependents {
                    dependents: vec![TalentId::new("practiced_kata")]
                },
                BlockingReason::StartingPathKey {
                    path: PathId::Warrior
                },
            ]
        );
        assert!(decision.blocking_reasons[0]
            .to_string()
            .contains("practiced_kata"));
    }

    #[test]
    fn unknown_talent_is_not_found() {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let c = warrior(1);
        assert!(resolver.can_refund(&c, "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn requirement_mode_parses_flags() {
        assert_eq!("true".parse::<RequirementMode>(), Ok(RequirementMode::Strict));
        assert_eq!("0".parse::<RequirementMode>(), Ok(RequirementMode::Advisory));
        assert!("maybe".parse::<RequirementMode>().is_err());
    }
}
