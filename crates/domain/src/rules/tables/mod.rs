//! Built-in talent trees and path metadata.

mod heroic;
mod radiant;
mod singer;
mod surges;

pub use surges::surge_tree;

use super::TalentTreeData;
use crate::entities::{PathId, PathInfo, TalentEdge, TalentNode};
use crate::ids::TalentId;
use crate::value_objects::{Attribute, Skill};

const COLUMN_WIDTH: f32 = 220.0;
const ROW_HEIGHT: f32 = 140.0;

pub(super) fn standard_paths() -> Vec<(PathInfo, TalentTreeData)> {
    let mut paths = heroic::paths();
    paths.extend(radiant::paths());
    paths.push(singer::path());
    paths
}

pub(super) fn info(
    path: PathId,
    name: &str,
    description: &str,
    key_talent: &str,
    recommended_attributes: &[Attribute],
    recommended_skills: &[Skill],
    starting_path_skill: Option<Skill>,
) -> PathInfo {
    PathInfo {
        path,
        name: name.to_string(),
        description: description.to_string(),
        key_talent: TalentId::new(key_talent),
        recommended_attributes: recommended_attributes.to_vec(),
        recommended_skills: recommended_skills.to_vec(),
        starting_path_skill,
    }
}

/// Assembles tree data column by column, one column per subclass.
pub(super) struct TreeBuilder {
    data: TalentTreeData,
    column: usize,
    rows: Vec<usize>,
}

impl TreeBuilder {
    pub(super) fn new(path: PathId, key: TalentNode) -> Self {
        let mut builder = Self {
            data: TalentTreeData {
                path,
                nodes: Vec::new(),
                edges: Vec::new(),
                subclasses: Vec::new(),
            },
            column: 0,
            rows: vec![0],
        };
        builder.place(key);
        builder
    }

    /// Starts a new subclass column with its header node.
    pub(super) fn subclass(mut self, id: &str, name: &str) -> Self {
        self.rows.push(0);
        self.column = self.rows.len() - 1;
        self.data.subclasses.push(name.to_string());
        self.place(TalentNode::subclass(id, name));
        self
    }

    /// Adds `node` below `parent` with a visible edge.
    pub(super) fn under(mut self, parent: &str, node: TalentNode) -> Self {
        self.data.edges.push(TalentEdge::new(parent, node.id.clone()));
        self.place(node);
        self
    }

    /// Adds a node with no incoming edge.
    pub(super) fn root(mut self, node: TalentNode) -> Self {
        self.place(node);
        self
    }

    pub(super) fn edge(mut self, edge: TalentEdge) -> Self {
        self.data.edges.push(edge);
        self
    }

    /// Merges a generated fragment into this tree.
    pub(super) fn merge(mut self, fragment: TalentTreeData) -> Self {
        self.data.nodes.extend(fragment.nodes);
        self.data.edges.extend(fragment.edges);
        self.data.subclasses.extend(fragment.subclasses);
        self
    }

    pub(super) fn build(self) -> TalentTreeData {
        self.data
    }

    fn place(&mut self, node: TalentNode) {
        let row = self.rows[self.column];
        self.rows[self.column] += 1;
        let node = match node.position {
            Some(_) => node,
            None => node.at(self.column as f32 * COLUMN_WIDTH, row as f32 * ROW_HEIGHT),
        };
        self.data.nodes.push(node);
    }
}
