use thiserror::Error;

use super::InvariantViolation;
use crate::entities::PathId;
use crate::error::DomainError;
use crate::ids::TalentId;
use crate::rules::{calculator, BlockingReason, Decision, PointPool};
use crate::value_objects::{Ancestry, Attribute, Skill};

/// Why a progression mutation was not applied.
///
/// Three classes are kept apart: user-facing rejections, unknown identifiers
/// (`NotFound`) and internal faults (`Invariant`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    #[error("Cannot unlock {talent_id}: {}", join(reasons))]
    PrerequisiteNotMet {
        talent_id: TalentId,
        reasons: Vec<BlockingReason>,
    },

    #[error("Cannot refund {talent_id}: unlocked dependents {dependents:?}")]
    HasDependents {
        talent_id: TalentId,
        dependents: Vec<TalentId>,
    },

    #[error("Starting path already chosen: {current}")]
    AlreadyHasStartingPath { current: PathId },

    #[error("No {pool} points available ({available})")]
    InsufficientPoints { pool: PointPool, available: i64 },

    #[error("{talent_id} comes from starting path {path}; change starting path instead")]
    BlockedByStartingPath { talent_id: TalentId, path: PathId },

    #[error("Cannot remove path {path}: key talent has unlocked dependents {dependents:?}")]
    KeyTalentHasDependents {
        path: PathId,
        dependents: Vec<TalentId>,
    },

    #[error("Remove {paths:?} before removing starting path {path}")]
    OtherPathsSelected { path: PathId, paths: Vec<PathId> },

    #[error("{talent_id} is the key talent of {path}; remove the path instead")]
    KeyTalentLocked { talent_id: TalentId, path: PathId },

    #[error("Talent already unlocked: {talent_id}")]
    TalentAlreadyUnlocked { talent_id: TalentId },

    #[error("Talent not unlocked: {talent_id}")]
    TalentNotUnlocked { talent_id: TalentId },

    #[error("Path already selected: {path}")]
    PathAlreadySelected { path: PathId },

    #[error("Path not selected: {path}")]
    PathNotSelected { path: PathId },

    #[error("Path {path} cannot be a starting path")]
    NotAStartingPath { path: PathId },

    #[error("Path {path} requires {ancestry} ancestry")]
    PathRequiresAncestry { path: PathId, ancestry: Ancestry },

    #[error("Multiclassing requires level 2 or higher (level {level})")]
    MulticlassLevelTooLow { level: u32 },

    #[error("A starting path must be selected first")]
    StartingPathRequired,

    #[error("Refund every talent except the starting key before changing starting path: {talents:?}")]
    BuildNotReset { talents: Vec<TalentId> },

    #[error("{attribute} {value} exceeds the cap of {cap}")]
    AttributeAboveCap {
        attribute: Attribute,
        value: u8,
        cap: u8,
    },

    #[error("Attribute points {total} exceed the cap of {cap}")]
    AttributePointsExceeded { total: u32, cap: u32 },

    #[error("{skill} rank {rank} exceeds the cap of {cap}")]
    SkillRankAboveCap { skill: Skill, rank: u8, cap: u8 },

    #[error("Skill ranks {total} exceed the cap of {cap}")]
    SkillRanksExceeded { total: u32, cap: u32 },

    #[error("{skill} cannot drop below the starting path grant")]
    SkillBelowStartingGrant { skill: Skill },

    #[error("Unlocked talents depend on the current value: {talents:?}")]
    RequiredByTalents { talents: Vec<TalentId> },

    #[error("Level {level} is too low for the current build: {violation}")]
    LevelTooLow {
        level: u32,
        violation: InvariantViolation,
    },

    #[error("Level must be between 1 and {}", calculator::MAX_LEVEL)]
    InvalidLevel,

    #[error(transparent)]
    NotFound(#[from] DomainError),

    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

fn join(reasons: &[BlockingReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProgressionError {
    /// Expected, user-facing validation failure.
    pub fn is_rejection(&self) -> bool {
        !self.is_not_found() && !self.is_invariant()
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Maps a failed unlock decision to the most specific error.
    pub(crate) fn from_unlock(talent_id: &str, decision: Decision) -> Self {
        let talent_id = TalentId::new(talent_id);
        if decision
            .blocking_reasons
            .iter()
            .any(|r| matches!(r, BlockingReason::AlreadyUnlocked { .. }))
        {
            return Self::TalentAlreadyUnlocked { talent_id };
        }
        if decision.only_points_missing() {
            if let Some(BlockingReason::NoPoints { pool, available }) =
                decision.blocking_reasons.first()
            {
                return Self::InsufficientPoints {
                    pool: *pool,
                    available: *available,
                };
            }
        }
        Self::PrerequisiteNotMet {
            talent_id,
            reasons: decision.blocking_reasons,
        }
    }

    /// Maps a failed refund decision; dependents take precedence.
    pub(crate) fn from_refund(talent_id: &str, decision: Decision) -> Self {
        let talent_id = TalentId::new(talent_id);
        let mut fallback = None;
        for reason in decision.blocking_reasons {
            match reason {
                BlockingReason::UnlockedDependents { dependents } => {
                    return Self::HasDependents {
                        talent_id,
                        dependents,
                    }
                }
                BlockingReason::StartingPathKey { path } => {
                    fallback.get_or_insert(Self::BlockedByStartingPath {
                        talent_id: talent_id.clone(),
                        path,
                    });
                }
                BlockingReason::KeyTalentOfSelectedPath { path } => {
                    fallback.get_or_insert(Self::KeyTalentLocked {
                        talent_id: talent_id.clone(),
                        path,
                    });
                }
                _ => {}
            }
        }
        fallback.unwrap_or(Self::TalentNotUnlocked { talent_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classes_are_distinct() {
        let rejection = ProgressionError::StartingPathRequired;
        let missing = ProgressionError::from(DomainError::not_found("talent", "nope"));
        let fault = ProgressionError::from(InvariantViolation::InvalidLevel);
        assert!(rejection.is_rejection());
        assert!(missing.is_not_found() && !missing.is_rejection());
        assert!(fault.is_invariant() && !fault.is_rejection());
    }

    #[test]
    fn points_only_decision_maps_to_insufficient_points() {
        let decision = Decision {
            allowed: false,
            blocking_reasons: vec![BlockingReason::NoPoints {
                pool: PointPool::Talent,
                available: 0,
            }],
            advisories: vec![],
        };
        assert_eq!(
            ProgressionError::from_unlock("practiced_kata", decision),
            ProgressionError::InsufficientPoints {
                pool: PointPool::Talent,
                available: 0
            }
        );
    }

    #[test]
    fn dependents_win_over_key_lock() {
        let decision = Decision {
            allowed: false,
            blocking_reasons: vec![
                BlockingReason::StartingPathKey {
                    path: PathId::Warrior,
                },
                BlockingReason::UnlockedDependents {
                    dependents: vec![TalentId::new("practiced_kata")],
                },
            ],
            advisories: vec![],
        };
        assert!(matches!(
            ProgressionError::from_refund("vigilant_stance", decision),
            ProgressionError::HasDependents { .. }
        ));
    }

    #[test]
    fn prerequisite_message_lists_reasons() {
        let err = ProgressionError::PrerequisiteNotMet {
            talent_id: TalentId::new("flamestance"),
            reasons: vec![BlockingReason::MissingPrerequisite {
                talent_id: TalentId::new("practiced_kata"),
            }],
        };
        assert_eq!(
            err.to_string(),
            "Cannot unlock flamestance: requires talent practiced_kata"
        );
    }
}
