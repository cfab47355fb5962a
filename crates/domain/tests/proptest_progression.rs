use std::sync::Arc;

use proptest::prelude::*;
use shardforge_domain::rules::calculator;
use shardforge_domain::{
    Ancestry, Attribute, CharacterId, CharacterProgression, PathId, RequirementMode, Resolver,
    RuleBook, Skill, TalentEdge, TalentId, TalentTreeData, UnlockKind,
};

// ===========================================================================
// Helpers
// ===========================================================================

fn rules() -> Arc<RuleBook> {
    RuleBook::standard().unwrap()
}

/// Every talent id in the standard tables, in a stable order.
fn all_talents(rules: &RuleBook) -> Vec<TalentId> {
    rules
        .trees()
        .flat_map(|tree| tree.nodes().iter().map(|n| n.id.clone()))
        .collect()
}

#[derive(Debug, Clone)]
enum MutOp {
    SelectPath { path: usize, as_starting: bool },
    RemovePath { path: usize },
    Unlock { talent: usize, ancestry: bool },
    Refund { talent: usize },
    Attribute { attribute: usize, value: u8 },
    SkillRank { skill: usize, rank: u8 },
    SetLevel { level: u32 },
    ChangeStartingPath,
}

fn apply(
    character: &mut CharacterProgression,
    resolver: &Resolver<'_>,
    talents: &[TalentId],
    op: &MutOp,
) {
    let before = character.clone();
    let result = match op {
        MutOp::SelectPath { path, as_starting } => character
            .select_path(resolver, PathId::ALL[path % PathId::ALL.len()], *as_starting)
            .map(|_| ()),
        MutOp::RemovePath { path } => character
            .remove_path(resolver, PathId::ALL[path % PathId::ALL.len()])
            .map(|_| ()),
        MutOp::Unlock { talent, ancestry } => character
            .unlock_talent(resolver, talents[talent % talents.len()].as_str(), *ancestry)
            .map(|_| ()),
        MutOp::Refund { talent } => character
            .refund_talent(resolver, talents[talent % talents.len()].as_str())
            .map(|_| ()),
        MutOp::Attribute { attribute, value } => character
            .assign_attribute(resolver, Attribute::ALL[attribute % Attribute::ALL.len()], *value)
            .map(|_| ()),
        MutOp::SkillRank { skill, rank } => character
            .assign_skill_rank(resolver, Skill::ALL[skill % Skill::ALL.len()], *rank)
            .map(|_| ()),
        MutOp::SetLevel { level } => character.set_level(resolver, *level).map(|_| ()),
        MutOp::ChangeStartingPath => character.change_starting_path(resolver).map(|_| ()),
    };
    if let Err(e) = result {
        assert!(!e.is_invariant(), "mutation let an invariant slip: {e}");
        assert_eq!(*character, before, "rejected mutation changed state: {e}");
    }
}

fn assert_valid(character: &CharacterProgression, rules: &RuleBook) {
    let ledger = character.ledger();
    let singer = character.ancestry().is_singer();

    // Budget
    let regular = ledger.unlocked_count() - ledger.ancestry_count();
    let level = character.level();
    assert!(regular as u64 <= u64::from(calculator::max_talents(level, singer)));
    assert!(ledger.ancestry_count() as u64 <= u64::from(calculator::max_ancestry_talents(level, singer)));

    // Prerequisites
    for (talent, _) in ledger.unlocked_talents() {
        let node = rules.node(talent.as_str()).unwrap();
        for required in node.required_talents() {
            assert!(
                ledger.is_unlocked(required.as_str()),
                "{talent} unlocked without {required}"
            );
        }
    }

    // Key talents
    for &path in ledger.selected_paths() {
        let key = &rules.path_info(path).unwrap().key_talent;
        assert!(ledger.is_unlocked(key.as_str()), "{path} selected without {key}");
    }

    assert_eq!(character.check_invariants(rules), Ok(()));
}

/// Rebuilds the standard book with invisible edges dropped (`false`) or with
/// an extra invisible twin for every visible edge (`true`).
fn reshaped(rules: &RuleBook, add_twins: bool) -> RuleBook {
    let parts: Vec<_> = rules
        .paths()
        .map(|info| {
            let tree = rules.tree(info.path).unwrap();
            let visible = tree.layout_edges().iter().filter(|e| !e.invisible).cloned();
            let edges: Vec<TalentEdge> = if add_twins {
                visible
                    .flat_map(|e| {
                        let twin = TalentEdge::invisible(e.from.clone(), e.to.clone());
                        [e, twin]
                    })
                    .collect()
            } else {
                visible.collect()
            };
            (
                info.clone(),
                TalentTreeData {
                    path: info.path,
                    nodes: tree.nodes().to_vec(),
                    edges,
                    subclasses: tree.subclasses().to_vec(),
                },
            )
        })
        .collect();
    RuleBook::from_parts(parts).unwrap()
}

// ===========================================================================
// Generators
// ===========================================================================

fn arb_ancestry() -> impl Strategy<Value = Ancestry> {
    prop_oneof![Just(Ancestry::Human), Just(Ancestry::Singer)]
}

fn arb_op() -> impl Strategy<Value = MutOp> {
    prop_oneof![
        3 => (0..16usize, any::<bool>())
            .prop_map(|(path, as_starting)| MutOp::SelectPath { path, as_starting }),
        1 => (0..16usize).prop_map(|path| MutOp::RemovePath { path }),
        6 => (0..512usize, any::<bool>())
            .prop_map(|(talent, ancestry)| MutOp::Unlock { talent, ancestry }),
        2 => (0..512usize).prop_map(|talent| MutOp::Refund { talent }),
        2 => (0..6usize, 0..=5u8)
            .prop_map(|(attribute, value)| MutOp::Attribute { attribute, value }),
        2 => (0..28usize, 0..=5u8).prop_map(|(skill, rank)| MutOp::SkillRank { skill, rank }),
        1 => (1..=21u32).prop_map(|level| MutOp::SetLevel { level }),
        1 => Just(MutOp::ChangeStartingPath),
    ]
}

fn arb_ops(max_ops: usize) -> impl Strategy<Value = Vec<MutOp>> {
    proptest::collection::vec(arb_op(), 1..=max_ops)
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Budgets, prerequisites and key talents hold after every step.
    #[test]
    fn random_mutations_keep_progression_valid(
        level in 1..=21u32,
        ancestry in arb_ancestry(),
        ops in arb_ops(60),
    ) {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let talents = all_talents(&rules);
        let mut character = CharacterProgression::new(CharacterId::new(), level, ancestry).unwrap();

        for op in &ops {
            apply(&mut character, &resolver, &talents, op);
            assert_valid(&character, &rules);
        }
    }

    /// Unlocking a legal talent and refunding it restores the exact state.
    #[test]
    fn unlock_then_refund_is_identity(
        level in 1..=21u32,
        ancestry in arb_ancestry(),
        ops in arb_ops(40),
    ) {
        let rules = rules();
        let resolver = Resolver::new(&rules, RequirementMode::Advisory);
        let talents = all_talents(&rules);
        let mut character = CharacterProgression::new(CharacterId::new(), level, ancestry).unwrap();
        for op in &ops {
            apply(&mut character, &resolver, &talents, op);
        }

        for talent in &talents {
            let path = rules.path_of(talent.as_str()).unwrap();
            let ancestry = path.is_singer();
            let decision = resolver
                .can_unlock(&character, talent.as_str(), UnlockKind::Purchase { ancestry })
                .unwrap();
            if !decision.allowed {
                continue;
            }
            let before = character.clone();
            let mut probe = character.clone();
            probe.unlock_talent(&resolver, talent.as_str(), ancestry).unwrap();
            probe.refund_talent(&resolver, talent.as_str()).unwrap();
            prop_assert_eq!(&probe, &before);
            prop_assert_eq!(probe.available_talent_points(), before.available_talent_points());
            prop_assert_eq!(probe.available_ancestry_points(), before.available_ancestry_points());
        }
    }

    /// Decisions ignore invisible duplicate edges.
    #[test]
    fn invisible_edges_do_not_change_decisions(
        level in 1..=21u32,
        ancestry in arb_ancestry(),
        ops in arb_ops(40),
    ) {
        let standard = rules();
        let plain = reshaped(&standard, false);
        let twinned = reshaped(&standard, true);
        let talents = all_talents(&standard);

        let resolver = Resolver::new(&standard, RequirementMode::Advisory);
        let mut character = CharacterProgression::new(CharacterId::new(), level, ancestry).unwrap();
        for op in &ops {
            apply(&mut character, &resolver, &talents, op);
        }

        let books = [&*standard, &plain, &twinned];
        for talent in &talents {
            let unlocks: Vec<_> = books
                .iter()
                .map(|book| {
                    Resolver::new(book, RequirementMode::Advisory)
                        .can_unlock(&character, talent.as_str(), UnlockKind::Purchase { ancestry: false })
                        .unwrap()
                })
                .collect();
            prop_assert_eq!(&unlocks[0], &unlocks[1]);
            prop_assert_eq!(&unlocks[0], &unlocks[2]);

            let refunds: Vec<_> = books
                .iter()
                .map(|book| {
                    Resolver::new(book, RequirementMode::Advisory)
                        .can_refund(&character, talent.as_str())
                        .unwrap()
                })
                .collect();
            prop_assert_eq!(&refunds[0], &refunds[1]);
            prop_assert_eq!(&refunds[0], &refunds[2]);
        }
    }
}
