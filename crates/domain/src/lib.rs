//! Shardforge domain: talent trees, rule tables, derived stats and the
//! character progression aggregate.
//!
//! Pure and synchronous. Nothing here performs I/O; persistence and logging
//! belong to the engine crate.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod rules;
pub mod value_objects;

pub use aggregates::{
    CharacterProgression, InvariantViolation, ProgressionError, ProgressionLedger, TalentGrant,
};
pub use entities::{
    ActionCost, AttributeRequirement, NodePosition, PathId, PathInfo, PathKind, SkillRequirement,
    TalentEdge, TalentNode, TalentRequirements,
};
pub use error::DomainError;
pub use events::{BuildReset, PathRemoved, PathSelected, StatChange, TalentRefunded, TalentUnlocked};
pub use ids::{CharacterId, TalentId};
pub use rules::calculator::{DerivedStats, RecoveryDie, SensesRange};
pub use rules::{
    BlockingReason, Decision, PointPool, RequirementMode, Resolver, RuleBook, RuleTableError,
    TalentTree, TalentTreeData, UnlockKind,
};
pub use value_objects::{Ancestry, Attribute, AttributeScores, Skill, SkillRanks};
