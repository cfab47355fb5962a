//! Result types returned to callers.

use serde::Serialize;
use shardforge_domain::{
    Ancestry, AttributeScores, CharacterId, CharacterProgression, Decision, DerivedStats, PathId,
    RuleBook, SkillRanks, TalentId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockedTalent {
    pub talent_id: TalentId,
    pub path: Option<PathId>,
    /// Paid from the ancestry pool.
    pub ancestry: bool,
}

/// Caller-facing snapshot of a character's progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionSummary {
    pub character_id: CharacterId,
    pub version: u64,
    pub level: u32,
    pub ancestry: Ancestry,
    pub selected_paths: Vec<PathId>,
    pub starting_path: Option<PathId>,
    pub unlocked_talents: Vec<UnlockedTalent>,
    pub available_talent_points: i64,
    pub available_ancestry_points: i64,
    /// Narrative requirements raised by the last unlock, if any.
    pub advisories: Vec<String>,
}

impl ProgressionSummary {
    pub fn new(progression: &CharacterProgression, rules: &RuleBook) -> Self {
        let ledger = progression.ledger();
        Self {
            character_id: progression.character_id(),
            version: progression.version(),
            level: progression.level(),
            ancestry: progression.ancestry(),
            selected_paths: ledger.selected_paths().iter().copied().collect(),
            starting_path: ledger.starting_path(),
            unlocked_talents: ledger
                .unlocked_talents()
                .map(|(id, grant)| UnlockedTalent {
                    talent_id: id.clone(),
                    path: rules.path_of(id.as_str()),
                    ancestry: grant.ancestry,
                })
                .collect(),
            available_talent_points: progression.available_talent_points(),
            available_ancestry_points: progression.available_ancestry_points(),
            advisories: Vec::new(),
        }
    }

    pub fn with_advisories(mut self, advisories: Vec<String>) -> Self {
        self.advisories = advisories;
        self
    }
}

/// What a mutation did, plus the committed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationResult<T> {
    pub outcome: T,
    pub summary: ProgressionSummary,
}

/// Full sheet view: summary plus raw and derived stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionSheet {
    pub summary: ProgressionSummary,
    pub attributes: AttributeScores,
    pub skills: SkillRanks,
    pub derived: DerivedStats,
}

/// Read-only answer to "could this talent be unlocked or refunded now?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalentPreview {
    pub talent_id: TalentId,
    pub path: PathId,
    pub unlocked: bool,
    pub unlock: Decision,
    pub refund: Decision,
}
