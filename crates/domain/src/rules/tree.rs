//! Talent trees and their canonical dependency graph.
//!
//! Raw tree data arrives as a node list, an edge list and subclass names. The
//! edge list mixes semantic edges with layout-only (`invisible`) duplicates, so
//! construction runs a pre-pass that builds a canonical edge set:
//!
//! 1. invisible edges are dropped,
//! 2. requirement talents become edges `requirement -> node`,
//! 3. edges touching subclass headers are dropped (headers are not talents),
//! 4. duplicate `(from, to)` pairs collapse to one.
//!
//! Every graph query (prerequisites, dependents, topological order) runs on
//! the canonical set. The raw edges stay available for rendering.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::RuleTableError;
use crate::entities::{PathId, TalentEdge, TalentNode};
use crate::ids::TalentId;

/// Raw, serializable description of one path's tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentTreeData {
    pub path: PathId,
    pub nodes: Vec<TalentNode>,
    #[serde(default)]
    pub edges: Vec<TalentEdge>,
    #[serde(default)]
    pub subclasses: Vec<String>,
}

/// A validated talent tree with an index over its canonical edges.
#[derive(Debug, Clone)]
pub struct TalentTree {
    path: PathId,
    key_talent: TalentId,
    nodes: Vec<TalentNode>,
    index: BTreeMap<TalentId, usize>,
    incoming: Vec<Vec<usize>>,
    outgoing: Vec<Vec<usize>>,
    topo_order: Vec<usize>,
    layout_edges: Vec<TalentEdge>,
    subclasses: Vec<String>,
}

impl TalentTree {
    /// Builds and validates a tree whose key talent is `key_talent`.
    pub fn from_data(data: TalentTreeData, key_talent: TalentId) -> Result<Self, RuleTableError> {
        let path = data.path;
        let mut index = BTreeMap::new();
        for (i, node) in data.nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(RuleTableError::DuplicateTalent {
                    talent: node.id.clone(),
                });
            }
        }

        match index.get(&key_talent).map(|&i| &data.nodes[i]) {
            None => return Err(RuleTableError::MissingKeyTalent { path, talent: key_talent }),
            Some(node) if node.is_subclass => {
                return Err(RuleTableError::KeyTalentIsSubclass { path, talent: key_talent })
            }
            Some(_) => {}
        }

        let mut pairs = BTreeSet::new();
        for edge in &data.edges {
            let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) else {
                return Err(RuleTableError::DanglingEdge {
                    path,
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            };
            if !edge.invisible {
                pairs.insert((from, to));
            }
        }
        for (to, node) in data.nodes.iter().enumerate() {
            for required in node.required_talents() {
                let Some(&from) = index.get(required) else {
                    return Err(RuleTableError::DanglingRequirement {
                        path,
                        talent: node.id.clone(),
                        requirement: required.clone(),
                    });
                };
                pairs.insert((from, to));
            }
        }
        pairs.retain(|&(from, to)| !data.nodes[from].is_subclass && !data.nodes[to].is_subclass);

        let mut incoming = vec![Vec::new(); data.nodes.len()];
        let mut outgoing = vec![Vec::new(); data.nodes.len()];
        for &(from, to) in &pairs {
            outgoing[from].push(to);
            incoming[to].push(from);
        }

        let topo_order = kahn_order(&incoming, &outgoing).ok_or_else(|| {
            let talents = cycle_members(&incoming, &outgoing)
                .into_iter()
                .map(|i| data.nodes[i].id.clone())
                .collect();
            RuleTableError::Cycle { path, talents }
        })?;

        Ok(Self {
            path,
            key_talent,
            nodes: data.nodes,
            index,
            incoming,
            outgoing,
            topo_order,
            layout_edges: data.edges,
            subclasses: data.subclasses,
        })
    }

    pub fn path(&self) -> PathId {
        self.path
    }

    pub fn key_talent(&self) -> &TalentId {
        &self.key_talent
    }

    pub fn is_key_talent(&self, id: &str) -> bool {
        self.key_talent == *id
    }

    pub fn nodes(&self) -> &[TalentNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&TalentNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn subclasses(&self) -> &[String] {
        &self.subclasses
    }

    /// Raw edges as authored, including invisible layout edges.
    pub fn layout_edges(&self) -> &[TalentEdge] {
        &self.layout_edges
    }

    /// Canonical `(from, to)` dependency pairs.
    pub fn canonical_edges(&self) -> impl Iterator<Item = (&TalentId, &TalentId)> + '_ {
        self.outgoing.iter().enumerate().flat_map(move |(from, tos)| {
            tos.iter()
                .map(move |&to| (&self.nodes[from].id, &self.nodes[to].id))
        })
    }

    /// Talents that must be unlocked before `id`.
    pub fn prerequisites_of(&self, id: &str) -> Vec<&TalentId> {
        self.index
            .get(id)
            .map(|&i| self.incoming[i].iter().map(|&p| &self.nodes[p].id).collect())
            .unwrap_or_default()
    }

    /// Talents that directly depend on `id`.
    pub fn dependents_of(&self, id: &str) -> Vec<&TalentId> {
        self.index
            .get(id)
            .map(|&i| self.outgoing[i].iter().map(|&d| &self.nodes[d].id).collect())
            .unwrap_or_default()
    }

    /// Everything reachable forward from `id`, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> BTreeSet<&TalentId> {
        let mut seen = BTreeSet::new();
        let Some(&start) = self.index.get(id) else {
            return BTreeSet::new();
        };
        let mut queue = VecDeque::from([start]);
        let mut visited = vec![false; self.nodes.len()];
        visited[start] = true;
        while let Some(current) = queue.pop_front() {
            for &next in &self.outgoing[current] {
                if !visited[next] {
                    visited[next] = true;
                    seen.insert(&self.nodes[next].id);
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Talents in dependency order: every prerequisite precedes its dependents.
    pub fn topological_order(&self) -> impl DoubleEndedIterator<Item = &TalentId> + '_ {
        self.topo_order.iter().map(|&i| &self.nodes[i].id)
    }

    /// Unlockable talents (subclass headers excluded).
    pub fn talents(&self) -> impl Iterator<Item = &TalentNode> + '_ {
        self.nodes.iter().filter(|n| !n.is_subclass)
    }
}

fn kahn_order(incoming: &[Vec<usize>], outgoing: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut in_degree: Vec<usize> = incoming.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..in_degree.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(in_degree.len());
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in &outgoing[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }
    (order.len() == in_degree.len()).then_some(order)
}

/// Nodes left over after peeling every node with zero in-degree.
fn cycle_members(incoming: &[Vec<usize>], outgoing: &[Vec<usize>]) -> Vec<usize> {
    let mut in_degree: Vec<usize> = incoming.iter().map(Vec::len).collect();
    let mut removed = vec![false; in_degree.len()];
    let mut queue: VecDeque<usize> = (0..in_degree.len()).filter(|&i| in_degree[i] == 0).collect();
    while let Some(node) = queue.pop_front() {
        removed[node] = true;
        for &next in &outgoing[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }
    (0..removed.len()).filter(|&i| !removed[i]).collect()
}
