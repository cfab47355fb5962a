//! Talent entities - nodes, edges and the requirements that gate them.

use serde::{Deserialize, Serialize};

use crate::ids::TalentId;
use crate::value_objects::{Attribute, Skill};

/// What it costs to use a talent in play. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCost {
    OneAction,
    TwoActions,
    ThreeActions,
    FreeAction,
    Reaction,
    Special,
    #[default]
    AlwaysActive,
}

/// Minimum attribute value demanded by a talent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRequirement {
    pub attribute: Attribute,
    pub min: u8,
}

/// Minimum skill rank demanded by a talent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRequirement {
    pub skill: Skill,
    pub min: u8,
}

/// Constraints checked before a talent may be unlocked.
///
/// `other` holds narrative conditions ("Speak the First Ideal") that cannot be
/// verified by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentRequirements {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub talents: Vec<TalentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributeRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<SkillRequirement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<String>,
}

impl TalentRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn talent(mut self, id: impl Into<TalentId>) -> Self {
        self.talents.push(id.into());
        self
    }

    pub fn attribute(mut self, attribute: Attribute, min: u8) -> Self {
        self.attribute = Some(AttributeRequirement { attribute, min });
        self
    }

    pub fn skill(mut self, skill: Skill, min: u8) -> Self {
        self.skill = Some(SkillRequirement { skill, min });
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn other(mut self, condition: impl Into<String>) -> Self {
        self.other.push(condition.into());
        self
    }
}

/// Opaque layout coordinates for rendering adapters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodePosition {
    pub x: f32,
    pub y: f32,
}

/// A single node in a path's talent tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentNode {
    pub id: TalentId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action_cost: ActionCost,
    /// Subclass headers group talents and can never be unlocked.
    #[serde(default)]
    pub is_subclass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<TalentRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<NodePosition>,
}

impl TalentNode {
    pub fn new(id: impl Into<TalentId>, name: impl Into<String>, action_cost: ActionCost) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            action_cost,
            is_subclass: false,
            requirements: None,
            position: None,
        }
    }

    /// Creates a subclass header node.
    pub fn subclass(id: impl Into<TalentId>, name: impl Into<String>) -> Self {
        Self {
            is_subclass: true,
            ..Self::new(id, name, ActionCost::AlwaysActive)
        }
    }

    pub fn with_requirements(mut self, requirements: TalentRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some(NodePosition { x, y });
        self
    }

    /// Prerequisite talents named directly in the node's requirements.
    pub fn required_talents(&self) -> &[TalentId] {
        self.requirements
            .as_ref()
            .map(|r| r.talents.as_slice())
            .unwrap_or(&[])
    }
}

/// Directed arc `from -> to`: `from` must be unlocked before `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TalentEdge {
    pub from: TalentId,
    pub to: TalentId,
    /// Layout-only edges carry no dependency meaning.
    #[serde(default)]
    pub invisible: bool,
}

impl TalentEdge {
    pub fn new(from: impl Into<TalentId>, to: impl Into<TalentId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            invisible: false,
        }
    }

    pub fn invisible(from: impl Into<TalentId>, to: impl Into<TalentId>) -> Self {
        Self {
            invisible: true,
            ..Self::new(from, to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirements_builder_collects_constraints() {
        let req = TalentRequirements::new()
            .talent("vigilant_stance")
            .skill(Skill::Athletics, 2)
            .level(3)
            .other("Access to a Shardblade");
        assert_eq!(req.talents, vec![TalentId::new("vigilant_stance")]);
        assert_eq!(
            req.skill,
            Some(SkillRequirement {
                skill: Skill::Athletics,
                min: 2
            })
        );
        assert_eq!(req.level, Some(3));
        assert_eq!(req.other.len(), 1);
    }

    #[test]
    fn subclass_header_has_no_requirements() {
        let node = TalentNode::subclass("warrior_duelist", "Duelist");
        assert!(node.is_subclass);
        assert!(node.required_talents().is_empty());
    }

    #[test]
    fn node_deserializes_with_defaults() {
        let node: TalentNode =
            serde_json::from_str(r#"{"id":"erudition","name":"Erudition"}"#).unwrap();
        assert_eq!(node.id, "erudition");
        assert!(!node.is_subclass);
        assert_eq!(node.action_cost, ActionCost::AlwaysActive);
    }

    #[test]
    fn edge_invisible_flag_defaults_false() {
        let edge: TalentEdge = serde_json::from_str(r#"{"from":"a","to":"b"}"#).unwrap();
        assert!(!edge.invisible);
        assert!(TalentEdge::invisible("a", "b").invisible);
    }
}
