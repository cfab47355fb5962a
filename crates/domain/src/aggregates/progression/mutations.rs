//! Validated mutations of [`CharacterProgression`].
//!
//! Every method validates against the resolver and calculator, applies the
//! change to a clone, checks invariants and only then replaces `self`.

use std::collections::BTreeSet;

use super::{CharacterProgression, InvariantViolation, ProgressionError, TalentGrant};
use crate::entities::{PathId, TalentRequirements};
use crate::events::{BuildReset, PathRemoved, PathSelected, StatChange, TalentRefunded, TalentUnlocked};
use crate::ids::TalentId;
use crate::rules::{calculator, unlocked_dependents, Resolver, RuleBook, UnlockKind};
use crate::value_objects::{Ancestry, Attribute, Skill};

impl CharacterProgression {
    // =========================================================================
    // Paths
    // =========================================================================

    /// Adds a path and unlocks its key talent.
    ///
    /// A starting path is free and grants one rank in its starting skill. A
    /// multiclass path costs a talent point and needs level 2. A Singer's
    /// first path also brings the Singer path and its key talent, paid from
    /// the ancestry pool.
    pub fn select_path(
        &mut self,
        resolver: &Resolver<'_>,
        path: PathId,
        as_starting: bool,
    ) -> Result<PathSelected, ProgressionError> {
        let rules = resolver.rules();
        let info = rules.path_info(path)?;
        let key = info.key_talent.clone();

        if self.ledger.has_path(path) {
            return Err(ProgressionError::PathAlreadySelected { path });
        }
        if path.is_singer() && !self.ancestry.is_singer() {
            return Err(ProgressionError::PathRequiresAncestry {
                path,
                ancestry: Ancestry::Singer,
            });
        }

        let kind = if as_starting {
            if let Some(current) = self.ledger.starting_path() {
                return Err(ProgressionError::AlreadyHasStartingPath { current });
            }
            if !path.is_heroic() {
                return Err(ProgressionError::NotAStartingPath { path });
            }
            UnlockKind::StartingKey
        } else {
            if self.ledger.starting_path().is_none() {
                return Err(ProgressionError::StartingPathRequired);
            }
            if path.is_singer() {
                UnlockKind::AncestryBonusKey
            } else if self.level <= 1 {
                return Err(ProgressionError::MulticlassLevelTooLow { level: self.level });
            } else {
                UnlockKind::MulticlassKey
            }
        };

        let decision = resolver.can_unlock(self, key.as_str(), kind)?;
        if !decision.allowed {
            return Err(ProgressionError::from_unlock(key.as_str(), decision));
        }

        let first_selection = self.ledger.selected_paths().is_empty();
        let mut next = self.clone();
        next.ledger.add_path(path);
        next.ledger.add_talent(
            key.clone(),
            TalentGrant {
                ancestry: kind.is_ancestry(),
            },
        );

        let mut starting_skill = None;
        if as_starting {
            next.ledger.set_starting_path(Some(path));
            if let Some(skill) = info.starting_path_skill {
                next.grant_skill_rank(skill)?;
                next.ledger.set_starting_skill_grant(Some(skill));
                starting_skill = Some(skill);
            }
        }

        let mut ancestry_bonus = None;
        if first_selection && self.ancestry.is_singer() && !path.is_singer() {
            let singer_key = rules.path_info(PathId::Singer)?.key_talent.clone();
            let bonus = resolver.can_unlock(&next, singer_key.as_str(), UnlockKind::AncestryBonusKey)?;
            if !bonus.allowed {
                return Err(ProgressionError::from_unlock(singer_key.as_str(), bonus));
            }
            next.ledger.add_path(PathId::Singer);
            next.ledger
                .add_talent(singer_key.clone(), TalentGrant { ancestry: true });
            ancestry_bonus = Some(singer_key);
        }

        self.commit(next, rules)?;
        Ok(PathSelected {
            path,
            key_talent: key,
            as_starting,
            starting_skill,
            ancestry_bonus,
            advisories: decision.advisories,
        })
    }

    /// Removes a path, refunding its remaining talents deepest first.
    ///
    /// Fails if anything reachable from the key talent is still unlocked. The
    /// starting path goes last, once every other path is removed.
    pub fn remove_path(
        &mut self,
        resolver: &Resolver<'_>,
        path: PathId,
    ) -> Result<PathRemoved, ProgressionError> {
        let rules = resolver.rules();
        let tree = rules.tree(path)?;
        if !self.ledger.has_path(path) {
            return Err(ProgressionError::PathNotSelected { path });
        }

        let was_starting = self.ledger.starting_path() == Some(path);
        if was_starting {
            let paths: Vec<PathId> = self
                .ledger
                .selected_paths()
                .iter()
                .copied()
                .filter(|p| *p != path)
                .collect();
            if !paths.is_empty() {
                return Err(ProgressionError::OtherPathsSelected { path, paths });
            }
        }

        let key = tree.key_talent().clone();
        let dependents = unlocked_dependents(tree, key.as_str(), self);
        if !dependents.is_empty() {
            return Err(ProgressionError::KeyTalentHasDependents { path, dependents });
        }

        let remaining: Vec<TalentId> = tree
            .topological_order()
            .rev()
            .filter(|t| **t != key && self.ledger.is_unlocked(t.as_str()))
            .cloned()
            .collect();

        let mut next = self.clone();
        let mut refunded = Vec::with_capacity(remaining.len() + 1);
        for talent in remaining {
            // Never fires while prerequisites stay inside one tree and removal runs deepest first.
            let blocking = unlocked_dependents(tree, talent.as_str(), &next);
            if !blocking.is_empty() {
                return Err(ProgressionError::HasDependents {
                    talent_id: talent,
                    dependents: blocking,
                });
            }
            next.ledger.remove_talent(talent.as_str());
            refunded.push(talent);
        }
        next.ledger.remove_talent(key.as_str());
        refunded.push(key);

        next.ledger.remove_path(path);
        let revoked_skill = if was_starting {
            next.revoke_starting_grant()
        } else {
            None
        };

        self.commit(next, rules)?;
        Ok(PathRemoved {
            path,
            refunded,
            was_starting,
            revoked_skill,
        })
    }

    /// Clears the whole build so a different starting path can be chosen.
    ///
    /// Only the starting key (and a Singer's bonus key) may still be unlocked.
    pub fn change_starting_path(
        &mut self,
        resolver: &Resolver<'_>,
    ) -> Result<BuildReset, ProgressionError> {
        let rules = resolver.rules();
        let current = self
            .ledger
            .starting_path()
            .ok_or(ProgressionError::StartingPathRequired)?;

        let mut exempt = BTreeSet::new();
        exempt.insert(rules.path_info(current)?.key_talent.clone());
        if self.ancestry.is_singer() && self.ledger.has_path(PathId::Singer) {
            exempt.insert(rules.path_info(PathId::Singer)?.key_talent.clone());
        }

        let extra: Vec<TalentId> = self
            .ledger
            .unlocked_talents()
            .map(|(id, _)| id)
            .filter(|id| !exempt.contains(*id))
            .cloned()
            .collect();
        if !extra.is_empty() {
            return Err(ProgressionError::BuildNotReset { talents: extra });
        }

        let cleared_paths = self.ledger.selected_paths().iter().copied().collect();
        let cleared_talents = self.ledger.unlocked_ids().into_iter().collect();
        let mut next = self.clone();
        next.ledger.clear_build();
        let revoked_skill = next.revoke_starting_grant();

        self.commit(next, rules)?;
        Ok(BuildReset {
            previous_starting_path: current,
            cleared_paths,
            cleared_talents,
            revoked_skill,
        })
    }

    // =========================================================================
    // Talents
    // =========================================================================

    /// Unlocks a talent from a selected path.
    ///
    /// Talents of the Singer tree always draw from the ancestry pool.
    pub fn unlock_talent(
        &mut self,
        resolver: &Resolver<'_>,
        talent_id: &str,
        is_ancestry: bool,
    ) -> Result<TalentUnlocked, ProgressionError> {
        let tree = resolver.rules().tree_for_talent(talent_id)?;
        let ancestry = is_ancestry || tree.path().is_singer();

        let decision = resolver.can_unlock(self, talent_id, UnlockKind::Purchase { ancestry })?;
        if !decision.allowed {
            return Err(ProgressionError::from_unlock(talent_id, decision));
        }

        let id = TalentId::new(talent_id);
        let mut next = self.clone();
        next.ledger.add_talent(id.clone(), TalentGrant { ancestry });
        self.commit(next, resolver.rules())?;

        Ok(TalentUnlocked {
            talent_id: id,
            path: tree.path(),
            ancestry,
            advisories: decision.advisories,
        })
    }

    /// Refunds a talent with no unlocked dependents.
    pub fn refund_talent(
        &mut self,
        resolver: &Resolver<'_>,
        talent_id: &str,
    ) -> Result<TalentRefunded, ProgressionError> {
        let tree = resolver.rules().tree_for_talent(talent_id)?;
        let decision = resolver.can_refund(self, talent_id)?;
        if !decision.allowed {
            return Err(ProgressionError::from_refund(talent_id, decision));
        }

        let mut next = self.clone();
        let grant = next.ledger.remove_talent(talent_id).unwrap_or_default();
        self.commit(next, resolver.rules())?;

        Ok(TalentRefunded {
            talent_id: TalentId::new(talent_id),
            path: tree.path(),
            ancestry: grant.ancestry,
        })
    }

    // =========================================================================
    // Stats
    // =========================================================================

    pub fn assign_attribute(
        &mut self,
        resolver: &Resolver<'_>,
        attribute: Attribute,
        value: u8,
    ) -> Result<StatChange, ProgressionError> {
        let from = self.attributes.get(attribute);
        if from == value {
            return Ok(StatChange::Unchanged);
        }

        let cap = calculator::max_modifier_per_attribute(self.level);
        if value > cap {
            return Err(ProgressionError::AttributeAboveCap {
                attribute,
                value,
                cap,
            });
        }
        let total = self.attributes.total() - u32::from(from) + u32::from(value);
        let cap = calculator::max_attribute_points(self.level);
        if total > cap {
            return Err(ProgressionError::AttributePointsExceeded { total, cap });
        }
        if value < from {
            let talents = self.talents_requiring(resolver.rules(), |req| {
                req.attribute
                    .is_some_and(|a| a.attribute == attribute && a.min > value)
            });
            if !talents.is_empty() {
                return Err(ProgressionError::RequiredByTalents { talents });
            }
        }

        let mut next = self.clone();
        next.attributes.set(attribute, value);
        self.commit(next, resolver.rules())?;
        Ok(StatChange::Attribute {
            attribute,
            from,
            to: value,
        })
    }

    pub fn assign_skill_rank(
        &mut self,
        resolver: &Resolver<'_>,
        skill: Skill,
        rank: u8,
    ) -> Result<StatChange, ProgressionError> {
        let from = self.skills.get(skill);
        if from == rank {
            return Ok(StatChange::Unchanged);
        }

        let cap = calculator::max_rank_per_skill(self.level);
        if rank > cap {
            return Err(ProgressionError::SkillRankAboveCap { skill, rank, cap });
        }
        let total = self.skills.total() - u32::from(from) + u32::from(rank);
        let cap = calculator::max_total_skill_ranks(self.level);
        if total > cap {
            return Err(ProgressionError::SkillRanksExceeded { total, cap });
        }
        if rank < from {
            if self.ledger.starting_skill_grant() == Some(skill) && rank < 1 {
                return Err(ProgressionError::SkillBelowStartingGrant { skill });
            }
            let talents = self.talents_requiring(resolver.rules(), |req| {
                req.skill.is_some_and(|s| s.skill == skill && s.min > rank)
            });
            if !talents.is_empty() {
                return Err(ProgressionError::RequiredByTalents { talents });
            }
        }

        let mut next = self.clone();
        next.skills.set(skill, rank);
        self.commit(next, resolver.rules())?;
        Ok(StatChange::Skill {
            skill,
            from,
            to: rank,
        })
    }

    /// Changes the character level.
    ///
    /// Lowering the level is rejected when the current build no longer fits
    /// the lower caps or an unlocked talent needs a higher level.
    pub fn set_level(
        &mut self,
        resolver: &Resolver<'_>,
        level: u32,
    ) -> Result<StatChange, ProgressionError> {
        if !calculator::is_valid_level(level) {
            return Err(ProgressionError::InvalidLevel);
        }
        let from = self.level;
        if from == level {
            return Ok(StatChange::Unchanged);
        }
        if level < from {
            let talents = self.talents_requiring(resolver.rules(), |req| {
                req.level.is_some_and(|min| min > level)
            });
            if !talents.is_empty() {
                return Err(ProgressionError::RequiredByTalents { talents });
            }
        }

        let mut next = self.clone();
        next.level = level;
        next.check_invariants(resolver.rules())
            .map_err(|violation| ProgressionError::LevelTooLow { level, violation })?;
        *self = next;
        Ok(StatChange::Level { from, to: level })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn commit(&mut self, next: Self, rules: &RuleBook) -> Result<(), InvariantViolation> {
        next.check_invariants(rules)?;
        *self = next;
        Ok(())
    }

    /// Adds the starting path's free rank, respecting skill caps.
    fn grant_skill_rank(&mut self, skill: Skill) -> Result<(), ProgressionError> {
        let rank = self.skills.get(skill) + 1;
        let cap = calculator::max_rank_per_skill(self.level);
        if rank > cap {
            return Err(ProgressionError::SkillRankAboveCap { skill, rank, cap });
        }
        let total = self.skills.total() + 1;
        let cap = calculator::max_total_skill_ranks(self.level);
        if total > cap {
            return Err(ProgressionError::SkillRanksExceeded { total, cap });
        }
        self.skills.set(skill, rank);
        Ok(())
    }

    fn revoke_starting_grant(&mut self) -> Option<Skill> {
        let skill = self.ledger.starting_skill_grant()?;
        let rank = self.skills.get(skill).saturating_sub(1);
        self.skills.set(skill, rank);
        self.ledger.set_starting_skill_grant(None);
        Some(skill)
    }

    fn talents_requiring(
        &self,
        rules: &RuleBook,
        predicate: impl Fn(&TalentRequirements) -> bool,
    ) -> Vec<TalentId> {
        self.ledger
            .unlocked_talents()
            .filter(|(id, _)| {
                rules
                    .node(id.as_str())
                    .and_then(|n| n.requirements.as_ref())
                    .is_some_and(&predicate)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }
}
