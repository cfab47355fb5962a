use super::{info, TreeBuilder};
use crate::entities::{ActionCost as Cost, PathId, PathInfo, TalentNode, TalentRequirements as Req};
use crate::rules::TalentTreeData;
use crate::value_objects::{Attribute, Skill};

fn talent(id: &str, name: &str, cost: Cost, description: &str) -> TalentNode {
    TalentNode::new(id, name, cost).describe(description)
}

pub(super) fn paths() -> Vec<(PathInfo, TalentTreeData)> {
    vec![agent(), envoy(), hunter(), leader(), scholar(), warrior()]
}

fn agent() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Agent,
        "Agent",
        "Investigators, spies and thieves who solve problems others cannot.",
        "opportunist",
        &[Attribute::Speed, Attribute::Awareness],
        &[Skill::Insight, Skill::Stealth, Skill::Thievery],
        Some(Skill::Insight),
    );
    let tree = TreeBuilder::new(
        PathId::Agent,
        talent("opportunist", "Opportunist", Cost::Special, "Reroll a plot die once per scene."),
    )
    .subclass("agent_investigator", "Investigator")
    .under("opportunist", talent("watchful_eye", "Watchful Eye", Cost::Reaction, "Spend focus to avoid being surprised.")
        .with_requirements(Req::new().talent("opportunist")))
    .under("watchful_eye", talent("get_em_talking", "Get 'Em Talking", Cost::OneAction, "Loosen a target's tongue.")
        .with_requirements(Req::new().talent("watchful_eye").skill(Skill::Insight, 2)))
    .under("get_em_talking", talent("deductive_reasoning", "Deductive Reasoning", Cost::AlwaysActive, "Use Deduction in place of Insight.")
        .with_requirements(Req::new().talent("get_em_talking").skill(Skill::Deduction, 2).level(3)))
    .subclass("agent_spy", "Spy")
    .under("opportunist", talent("sure_outcome", "Sure Outcome", Cost::Reaction, "Turn a complication into an opportunity.")
        .with_requirements(Req::new().talent("opportunist")))
    .under("sure_outcome", talent("plausible_excuse", "Plausible Excuse", Cost::FreeAction, "Talk your way out of being caught.")
        .with_requirements(Req::new().talent("sure_outcome").skill(Skill::Deception, 2)))
    .subclass("agent_thief", "Thief")
    .under("opportunist", talent("risky_behavior", "Risky Behavior", Cost::Special, "Gain advantage by raising the stakes.")
        .with_requirements(Req::new().talent("opportunist")))
    .under("risky_behavior", talent("cheap_shot", "Cheap Shot", Cost::OneAction, "Strike an unaware target.")
        .with_requirements(Req::new().talent("risky_behavior").skill(Skill::Thievery, 2)))
    .under("cheap_shot", talent("fast_hands", "Fast Hands", Cost::FreeAction, "Pick locks and pockets in a moment.")
        .with_requirements(Req::new().talent("cheap_shot").attribute(Attribute::Speed, 3)))
    .build();
    (info, tree)
}

fn envoy() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Envoy,
        "Envoy",
        "Diplomats, faithful and mentors who move people with words.",
        "rousing_presence",
        &[Attribute::Presence, Attribute::Willpower],
        &[Skill::Discipline, Skill::Persuasion, Skill::Insight],
        Some(Skill::Discipline),
    );
    let tree = TreeBuilder::new(
        PathId::Envoy,
        talent("rousing_presence", "Rousing Presence", Cost::OneAction, "Grant an ally focus and advantage."),
    )
    .subclass("envoy_diplomat", "Diplomat")
    .under("rousing_presence", talent("steadfast_challenge", "Steadfast Challenge", Cost::OneAction, "Demand a foe's attention.")
        .with_requirements(Req::new().talent("rousing_presence")))
    .under("steadfast_challenge", talent("well_dressed", "Well Dressed", Cost::AlwaysActive, "Fine attire opens doors.")
        .with_requirements(Req::new().talent("steadfast_challenge").skill(Skill::Persuasion, 2)))
    .subclass("envoy_faithful", "Faithful")
    .under("rousing_presence", talent("customary_garb", "Customary Garb", Cost::AlwaysActive, "Religious garb grants trust.")
        .with_requirements(Req::new().talent("rousing_presence")))
    .under("customary_garb", talent("galvanize", "Galvanize", Cost::TwoActions, "Rally every nearby ally.")
        .with_requirements(Req::new().talent("customary_garb").attribute(Attribute::Presence, 3).level(3)))
    .subclass("envoy_mentor", "Mentor")
    .under("rousing_presence", talent("practical_demonstration", "Practical Demonstration", Cost::OneAction, "Teach by example.")
        .with_requirements(Req::new().talent("rousing_presence")))
    .under("practical_demonstration", talent("foresight", "Foresight", Cost::Reaction, "Warn an ally of danger.")
        .with_requirements(Req::new().talent("practical_demonstration").skill(Skill::Insight, 2)))
    .build();
    (info, tree)
}

fn hunter() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Hunter,
        "Hunter",
        "Archers, assassins and trackers who pursue their quarry relentlessly.",
        "seek_quarry",
        &[Attribute::Awareness, Attribute::Speed],
        &[Skill::Perception, Skill::Survival, Skill::Stealth],
        Some(Skill::Perception),
    );
    let tree = TreeBuilder::new(
        PathId::Hunter,
        talent("seek_quarry", "Seek Quarry", Cost::OneAction, "Mark a quarry and gain advantage against it."),
    )
    .subclass("hunter_archer", "Archer")
    .under("seek_quarry", talent("combat_coordination", "Combat Coordination", Cost::FreeAction, "Share your quarry with allies.")
        .with_requirements(Req::new().talent("seek_quarry")))
    .under("combat_coordination", talent("steady_aim", "Steady Aim", Cost::OneAction, "Ignore cover when firing.")
        .with_requirements(Req::new().talent("combat_coordination").skill(Skill::LightWeaponry, 2)))
    .subclass("hunter_assassin", "Assassin")
    .under("seek_quarry", talent("startling_blow", "Startling Blow", Cost::OneAction, "Strike before the quarry reacts.")
        .with_requirements(Req::new().talent("seek_quarry")))
    .under("startling_blow", talent("killing_edge", "Killing Edge", Cost::AlwaysActive, "Critical hits deal extra damage.")
        .with_requirements(Req::new().talent("startling_blow").level(3)))
    .subclass("hunter_tracker", "Tracker")
    .under("seek_quarry", talent("tracking", "Tracking", Cost::AlwaysActive, "Follow any trail.")
        .with_requirements(Req::new().talent("seek_quarry").skill(Skill::Survival, 1)))
    .under("tracking", talent("animal_bond", "Animal Bond", Cost::Special, "Gain an animal companion.")
        .with_requirements(Req::new().talent("tracking").attribute(Attribute::Awareness, 2)))
    .build();
    (info, tree)
}

fn leader() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Leader,
        "Leader",
        "Champions, officers and politicos who command others.",
        "decisive_command",
        &[Attribute::Presence, Attribute::Intellect],
        &[Skill::Leadership, Skill::Persuasion, Skill::Deduction],
        Some(Skill::Leadership),
    );
    let tree = TreeBuilder::new(
        PathId::Leader,
        talent("decisive_command", "Decisive Command", Cost::OneAction, "Grant an ally an extra die."),
    )
    .subclass("leader_champion", "Champion")
    .under("decisive_command", talent("valiant_intervention", "Valiant Intervention", Cost::Reaction, "Take a blow for an ally.")
        .with_requirements(Req::new().talent("decisive_command")))
    .under("valiant_intervention", talent("imposing_posture", "Imposing Posture", Cost::OneAction, "Frighten nearby foes.")
        .with_requirements(Req::new().talent("valiant_intervention").skill(Skill::Intimidation, 2)))
    .subclass("leader_officer", "Officer")
    .under("decisive_command", talent("through_the_fray", "Through the Fray", Cost::OneAction, "Move allies across the battlefield.")
        .with_requirements(Req::new().talent("decisive_command")))
    .under("through_the_fray", talent("tactical_direction", "Tactical Direction", Cost::TwoActions, "Coordinate a strike.")
        .with_requirements(Req::new().talent("through_the_fray").level(3)))
    .subclass("leader_politico", "Politico")
    .under("decisive_command", talent("cutthroat_tactics", "Cutthroat Tactics", Cost::FreeAction, "Exploit a rival's weakness.")
        .with_requirements(Req::new().talent("decisive_command")))
    .under("cutthroat_tactics", talent("grand_design", "Grand Design", Cost::Special, "Reveal the plan behind the plan.")
        .with_requirements(Req::new().talent("cutthroat_tactics").attribute(Attribute::Intellect, 3)))
    .build();
    (info, tree)
}

fn scholar() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Scholar,
        "Scholar",
        "Archivists, strategists and surgeons who trust knowledge.",
        "erudition",
        &[Attribute::Intellect, Attribute::Willpower],
        &[Skill::Lore, Skill::Medicine, Skill::Crafting],
        Some(Skill::Lore),
    );
    let tree = TreeBuilder::new(
        PathId::Scholar,
        talent("erudition", "Erudition", Cost::AlwaysActive, "Temporarily gain ranks in cognitive skills."),
    )
    .subclass("scholar_archivist", "Archivist")
    .under("erudition", talent("education", "Education", Cost::AlwaysActive, "Gain additional expertises.")
        .with_requirements(Req::new().talent("erudition")))
    .under("education", talent("endless_reference", "Endless Reference", Cost::OneAction, "Recall an obscure fact.")
        .with_requirements(Req::new().talent("education").skill(Skill::Lore, 2)))
    .subclass("scholar_strategist", "Strategist")
    .under("erudition", talent("mind_and_body", "Mind and Body", Cost::AlwaysActive, "Use Intellect for Strength tests.")
        .with_requirements(Req::new().talent("erudition")))
    .under("mind_and_body", talent("contingency", "Contingency", Cost::Reaction, "Prepare for the worst.")
        .with_requirements(Req::new().talent("mind_and_body").skill(Skill::Deduction, 2).level(3)))
    .subclass("scholar_surgeon", "Surgeon")
    .under("erudition", talent("emotional_intelligence", "Emotional Intelligence", Cost::AlwaysActive, "Read a patient's state.")
        .with_requirements(Req::new().talent("erudition")))
    .under("emotional_intelligence", talent("field_medicine", "Field Medicine", Cost::TwoActions, "Heal in the middle of battle.")
        .with_requirements(Req::new().talent("emotional_intelligence").skill(Skill::Medicine, 2)))
    .build();
    (info, tree)
}

fn warrior() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Warrior,
        "Warrior",
        "Duelists, shardbearers and soldiers trained for combat.",
        "vigilant_stance",
        &[Attribute::Strength, Attribute::Speed],
        &[Skill::Athletics, Skill::HeavyWeaponry, Skill::LightWeaponry],
        Some(Skill::Athletics),
    );
    let tree = TreeBuilder::new(
        PathId::Warrior,
        talent("vigilant_stance", "Vigilant Stance", Cost::FreeAction, "Enter a stance that lets you react more readily."),
    )
    .subclass("warrior_duelist", "Duelist")
    .under("vigilant_stance", talent("practiced_kata", "Practiced Kata", Cost::AlwaysActive, "Gain advantage after dodging.")
        .with_requirements(Req::new().talent("vigilant_stance")))
    .under("practiced_kata", talent("flamestance", "Flamestance", Cost::FreeAction, "An aggressive stance that trades defense for damage.")
        .with_requirements(Req::new().talent("practiced_kata").skill(Skill::HeavyWeaponry, 1)))
    .under("practiced_kata", talent("surefooted", "Surefooted", Cost::AlwaysActive, "Ignore difficult terrain.")
        .with_requirements(Req::new().talent("practiced_kata").attribute(Attribute::Speed, 2)))
    .under("flamestance", talent("stonestance", "Stonestance", Cost::FreeAction, "A defensive stance that holds ground.")
        .with_requirements(Req::new().talent("flamestance").level(3)))
    .subclass("warrior_shardbearer", "Shardbearer")
    .under("combat_training", talent("shard_training", "Shard Training", Cost::AlwaysActive, "Wield Shards without penalty.")
        .with_requirements(Req::new().talent("combat_training").other("Access to a Shardblade or Shardplate")))
    .under("shard_training", talent("shardblade_mastery", "Shardblade Mastery", Cost::AlwaysActive, "Strike with a Shardblade's full reach.")
        .with_requirements(Req::new().talent("shard_training").skill(Skill::HeavyWeaponry, 2)))
    .under("shard_training", talent("ironstance", "Ironstance", Cost::FreeAction, "A stance that shrugs off blows in Shardplate.")
        .with_requirements(Req::new().talent("shard_training").attribute(Attribute::Strength, 3)))
    .subclass("warrior_soldier", "Soldier")
    .under("vigilant_stance", talent("combat_training", "Combat Training", Cost::AlwaysActive, "Gain an expertise in a weapon and armor.")
        .with_requirements(Req::new().talent("vigilant_stance")))
    .under("vigilant_stance", talent("cautious_advance", "Cautious Advance", Cost::OneAction, "Move without provoking reactions."))
    .root(talent("hardy", "Hardy", Cost::AlwaysActive, "Increase maximum health by your level.")
        .with_requirements(Req::new().level(2)))
    .build();
    (info, tree)
}
