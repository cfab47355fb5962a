use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::entities::PathId;
use crate::ids::TalentId;
use crate::value_objects::Skill;

/// How a talent was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TalentGrant {
    /// Drawn from the ancestry pool rather than the regular pool.
    pub ancestry: bool,
}

/// A character's unlock and selection state.
///
/// Mutators are crate-private and perform no validation; the owning
/// [`CharacterProgression`](super::CharacterProgression) validates first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionLedger {
    #[serde(default)]
    unlocked: BTreeMap<TalentId, TalentGrant>,
    #[serde(default)]
    selected_paths: BTreeSet<PathId>,
    #[serde(default)]
    starting_path: Option<PathId>,
    /// Skill that received the starting path's free rank.
    #[serde(default)]
    starting_skill_grant: Option<Skill>,
}

impl ProgressionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlocked_talents(&self) -> impl Iterator<Item = (&TalentId, TalentGrant)> + '_ {
        self.unlocked.iter().map(|(id, grant)| (id, *grant))
    }

    pub fn unlocked_ids(&self) -> BTreeSet<TalentId> {
        self.unlocked.keys().cloned().collect()
    }

    pub fn is_unlocked(&self, talent: &str) -> bool {
        self.unlocked.contains_key(talent)
    }

    pub fn grant(&self, talent: &str) -> Option<TalentGrant> {
        self.unlocked.get(talent).copied()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn ancestry_count(&self) -> usize {
        self.unlocked.values().filter(|g| g.ancestry).count()
    }

    pub fn selected_paths(&self) -> &BTreeSet<PathId> {
        &self.selected_paths
    }

    pub fn has_path(&self, path: PathId) -> bool {
        self.selected_paths.contains(&path)
    }

    pub fn starting_path(&self) -> Option<PathId> {
        self.starting_path
    }

    pub fn starting_skill_grant(&self) -> Option<Skill> {
        self.starting_skill_grant
    }

    pub(crate) fn add_talent(&mut self, talent: TalentId, grant: TalentGrant) {
        self.unlocked.insert(talent, grant);
    }

    pub(crate) fn remove_talent(&mut self, talent: &str) -> Option<TalentGrant> {
        self.unlocked.remove(talent)
    }

    pub(crate) fn add_path(&mut self, path: PathId) {
        self.selected_paths.insert(path);
    }

    pub(crate) fn remove_path(&mut self, path: PathId) {
        self.selected_paths.remove(&path);
        if self.starting_path == Some(path) {
            self.starting_path = None;
        }
    }

    pub(crate) fn set_starting_path(&mut self, path: Option<PathId>) {
        self.starting_path = path;
    }

    pub(crate) fn set_starting_skill_grant(&mut self, skill: Option<Skill>) {
        self.starting_skill_grant = skill;
    }

    /// Drops every path and talent. The starting skill grant is left to the caller.
    pub(crate) fn clear_build(&mut self) {
        self.unlocked.clear();
        self.selected_paths.clear();
        self.starting_path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ancestry_separately() {
        let mut ledger = ProgressionLedger::new();
        ledger.add_talent(TalentId::new("vigilant_stance"), TalentGrant::default());
        ledger.add_talent(TalentId::new("change_form"), TalentGrant { ancestry: true });
        assert_eq!(ledger.unlocked_count(), 2);
        assert_eq!(ledger.ancestry_count(), 1);
        assert!(ledger.is_unlocked("change_form"));
    }

    #[test]
    fn removing_starting_path_clears_flag() {
        let mut ledger = ProgressionLedger::new();
        ledger.add_path(PathId::Warrior);
        ledger.set_starting_path(Some(PathId::Warrior));
        ledger.remove_path(PathId::Warrior);
        assert_eq!(ledger.starting_path(), None);
        assert!(ledger.selected_paths().is_empty());
    }
}
