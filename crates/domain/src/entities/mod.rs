//! Domain entities - talent tree building blocks and path metadata

mod path;
mod talent;

pub use path::{PathId, PathInfo, PathKind};
pub use talent::{
    ActionCost, AttributeRequirement, NodePosition, SkillRequirement, TalentEdge, TalentNode,
    TalentRequirements,
};
