//! Value objects - Immutable objects defined by their attributes

mod ancestry;
mod attribute;
mod skill;

pub use ancestry::Ancestry;
pub use attribute::{Attribute, AttributeScores};
pub use skill::{Skill, SkillRanks};
