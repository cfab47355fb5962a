//! Static rule tables and the pure logic that reads them.
//!
//! - [`RuleBook`] indexes every path's [`TalentTree`] and [`PathInfo`]
//! - [`calculator`] maps level/ancestry/raw values to caps and derived stats
//! - [`Resolver`] answers "may this talent be unlocked / refunded now?"

pub mod calculator;
mod resolver;
mod tables;
mod tree;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::entities::{PathId, PathInfo, TalentNode};
use crate::error::DomainError;
use crate::ids::TalentId;
use crate::value_objects::Skill;

pub use resolver::{BlockingReason, Decision, PointPool, RequirementMode, Resolver, UnlockKind};
pub(crate) use resolver::unlocked_dependents;
pub use tables::surge_tree;
pub use tree::{TalentTree, TalentTreeData};

/// Faults in static rule data, detected once at construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("Talent id {talent} is defined more than once")]
    DuplicateTalent { talent: TalentId },

    #[error("Path {path} is defined more than once")]
    DuplicatePath { path: PathId },

    #[error("Path {path}: tree data is labelled {found}")]
    PathMismatch { path: PathId, found: PathId },

    #[error("Path {path}: key talent {talent} is not in the tree")]
    MissingKeyTalent { path: PathId, talent: TalentId },

    #[error("Path {path}: key talent {talent} is a subclass header")]
    KeyTalentIsSubclass { path: PathId, talent: TalentId },

    #[error("Path {path}: edge {from} -> {to} references an unknown talent")]
    DanglingEdge {
        path: PathId,
        from: TalentId,
        to: TalentId,
    },

    #[error("Path {path}: talent {talent} requires unknown talent {requirement}")]
    DanglingRequirement {
        path: PathId,
        talent: TalentId,
        requirement: TalentId,
    },

    #[error("Path {path}: prerequisite cycle through {talents:?}")]
    Cycle { path: PathId, talents: Vec<TalentId> },

    #[error("Path {path}: surge {skill} cannot be a starting skill")]
    SurgeStartingSkill { path: PathId, skill: Skill },
}

static STANDARD: Lazy<Result<Arc<RuleBook>, RuleTableError>> =
    Lazy::new(|| RuleBook::from_parts(tables::standard_paths()).map(Arc::new));

/// Every path's tree and metadata, plus a `talent -> path` index.
#[derive(Debug, Clone)]
pub struct RuleBook {
    trees: BTreeMap<PathId, TalentTree>,
    infos: BTreeMap<PathId, PathInfo>,
    talent_paths: HashMap<TalentId, PathId>,
}

impl RuleBook {
    /// The built-in rule tables, built and validated on first use.
    pub fn standard() -> Result<Arc<RuleBook>, RuleTableError> {
        match &*STANDARD {
            Ok(rules) => Ok(Arc::clone(rules)),
            Err(e) => Err(e.clone()),
        }
    }

    /// Builds a rule book from path metadata and raw tree data.
    ///
    /// Talent ids must be unique across the union of all trees.
    pub fn from_parts(
        parts: impl IntoIterator<Item = (PathInfo, TalentTreeData)>,
    ) -> Result<Self, RuleTableError> {
        let mut trees = BTreeMap::new();
        let mut infos = BTreeMap::new();
        let mut talent_paths = HashMap::new();

        for (info, data) in parts {
            let path = info.path;
            if data.path != path {
                return Err(RuleTableError::PathMismatch {
                    path,
                    found: data.path,
                });
            }
            if infos.contains_key(&path) {
                return Err(RuleTableError::DuplicatePath { path });
            }
            if let Some(skill) = info.starting_path_skill.filter(Skill::is_surge) {
                return Err(RuleTableError::SurgeStartingSkill { path, skill });
            }
            let tree = TalentTree::from_data(data, info.key_talent.clone())?;
            for node in tree.nodes() {
                if talent_paths.insert(node.id.clone(), path).is_some() {
                    return Err(RuleTableError::DuplicateTalent {
                        talent: node.id.clone(),
                    });
                }
            }
            trees.insert(path, tree);
            infos.insert(path, info);
        }

        Ok(Self {
            trees,
            infos,
            talent_paths,
        })
    }

    pub fn tree(&self, path: PathId) -> Result<&TalentTree, DomainError> {
        self.trees
            .get(&path)
            .ok_or_else(|| DomainError::not_found("talent tree", path.as_str()))
    }

    pub fn path_info(&self, path: PathId) -> Result<&PathInfo, DomainError> {
        self.infos
            .get(&path)
            .ok_or_else(|| DomainError::not_found("path", path.as_str()))
    }

    pub fn path_of(&self, talent: &str) -> Option<PathId> {
        self.talent_paths.get(talent).copied()
    }

    /// The tree that owns `talent`.
    pub fn tree_for_talent(&self, talent: &str) -> Result<&TalentTree, DomainError> {
        let path = self
            .path_of(talent)
            .ok_or_else(|| DomainError::not_found("talent", talent))?;
        self.tree(path)
    }

    pub fn node(&self, talent: &str) -> Option<&TalentNode> {
        self.tree_for_talent(talent).ok()?.node(talent)
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathInfo> + '_ {
        self.infos.values()
    }

    pub fn trees(&self) -> impl Iterator<Item = &TalentTree> + '_ {
        self.trees.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ActionCost, TalentEdge};

    #[test]
    fn standard_rule_book_covers_every_path() {
        let rules = RuleBook::standard().unwrap();
        for path in PathId::ALL {
            let info = rules.path_info(path).unwrap();
            let tree = rules.tree(path).unwrap();
            assert_eq!(tree.key_talent(), &info.key_talent);
            assert_eq!(rules.path_of(info.key_talent.as_str()), Some(path));
        }
    }

    #[test]
    fn warrior_tables_match_documented_values() {
        let rules = RuleBook::standard().unwrap();
        let info = rules.path_info(PathId::Warrior).unwrap();
        assert_eq!(info.key_talent, "vigilant_stance");
        assert_eq!(info.starting_path_skill, Some(Skill::Athletics));
        let tree = rules.tree(PathId::Warrior).unwrap();
        assert_eq!(
            tree.prerequisites_of("practiced_kata"),
            vec![&TalentId::new("vigilant_stance")]
        );
    }

    #[test]
    fn radiant_trees_carry_invisible_layout_edges() {
        let rules = RuleBook::standard().unwrap();
        let tree = rules.tree(PathId::Windrunner).unwrap();
        assert!(tree.layout_edges().iter().any(|e| e.invisible));
        assert!(tree.contains("windrunner_gravitation"));
        assert!(tree.contains("windrunner_adhesion"));
    }

    #[test]
    fn only_heroic_paths_grant_starting_skills() {
        let rules = RuleBook::standard().unwrap();
        for info in rules.paths() {
            assert_eq!(info.starting_path_skill.is_some(), info.path.is_heroic());
        }
    }

    #[test]
    fn unknown_talent_is_not_found() {
        let rules = RuleBook::standard().unwrap();
        assert!(rules.tree_for_talent("no_such_talent").unwrap_err().is_not_found());
    }

    fn part(path: PathId, key: &str) -> (PathInfo, TalentTreeData) {
        (
            PathInfo {
                path,
                name: path.as_str().to_string(),
                description: String::new(),
                key_talent: TalentId::new(key),
                recommended_attributes: vec![],
                recommended_skills: vec![],
                starting_path_skill: None,
            },
            TalentTreeData {
                path,
                nodes: vec![
                    TalentNode::new(key, key, ActionCost::AlwaysActive),
                    TalentNode::new("shared", "Shared", ActionCost::OneAction),
                ],
                edges: vec![TalentEdge::new(key, "shared")],
                subclasses: vec![],
            },
        )
    }

    #[test]
    fn rejects_ids_shared_between_trees() {
        let err = RuleBook::from_parts([part(PathId::Agent, "a"), part(PathId::Envoy, "b")])
            .unwrap_err();
        assert_eq!(
            err,
            RuleTableError::DuplicateTalent {
                talent: TalentId::new("shared")
            }
        );
    }

    #[test]
    fn surges_cannot_be_starting_skills() {
        let (mut info, data) = part(PathId::Agent, "a");
        info.starting_path_skill = Some(Skill::Adhesion);
        assert_eq!(
            RuleBook::from_parts([(info, data)]).unwrap_err(),
            RuleTableError::SurgeStartingSkill {
                path: PathId::Agent,
                skill: Skill::Adhesion
            }
        );
    }

    #[test]
    fn missing_tree_is_not_found() {
        let rules = RuleBook::from_parts(std::iter::empty()).unwrap();
        assert!(rules.tree(PathId::Warrior).unwrap_err().is_not_found());
    }
}
