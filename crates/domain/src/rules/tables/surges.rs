use crate::entities::{ActionCost, PathId, TalentEdge, TalentNode, TalentRequirements};
use crate::ids::TalentId;
use crate::rules::TalentTreeData;
use crate::value_objects::Skill;

/// Skill rank and character level demanded by each surge stage.
const STAGES: [(u8, Option<u32>); 4] = [(1, None), (2, None), (3, Some(6)), (4, Some(11))];

fn stage_names(surge: Skill) -> [&'static str; 4] {
    match surge {
        Skill::Adhesion => ["Full Lashing", "Adhesive Hold", "Binding Strike", "Bonded Surfaces"],
        Skill::Gravitation => ["Basic Lashing", "Reverse Lashing", "Windborne", "Lashing Mastery"],
        Skill::Division => ["Decay", "Burning Touch", "Dissolution", "Annihilation"],
        Skill::Abrasion => ["Frictionless Motion", "Slick Surface", "Gliding Strike", "Effortless Flow"],
        Skill::Progression => ["Regrowth", "Swift Healing", "Growth", "Restoration"],
        Skill::Illumination => ["Lightweaving", "Illusory Disguise", "Living Image", "Grand Illusion"],
        Skill::Transformation => ["Soulcasting", "Quick Cast", "Essence Mastery", "Elemental Command"],
        Skill::Transportation => ["Elsecalling", "Cognitive Step", "Perpendicularity", "Shadesmar Passage"],
        Skill::Cohesion => ["Stoneshaping", "Molding Stone", "Stone Walk", "Stoneborn"],
        Skill::Tension => ["Rigid Fabric", "Tensile Strike", "Reinforce", "Unyielding Form"],
        _ => ["Surge", "Surge II", "Surge III", "Surge IV"],
    }
}

fn stage_id(order: PathId, surge: Skill, stage: usize) -> TalentId {
    match stage {
        0 => TalentId::new(format!("{}_{}", order.as_str(), surge.as_str())),
        n => TalentId::new(format!("{}_{}_{}", order.as_str(), surge.as_str(), n + 1)),
    }
}

/// Builds one surge sub-tree for a Radiant order.
///
/// The fragment holds a subclass header and four stages gated by surge rank
/// and level. Stage one hangs off `first_ideal`; the anchor edge is emitted
/// twice, once invisible, for renderers that draw the surge columns apart.
/// `offset` shifts the fragment horizontally.
pub fn surge_tree(order: PathId, surge: Skill, first_ideal: &TalentId, offset: f32) -> TalentTreeData {
    let header_id = format!("{}_{}_surge", order.as_str(), surge.as_str());
    let names = stage_names(surge);
    let mut nodes = vec![TalentNode::subclass(header_id.as_str(), surge.display_name()).at(offset, 0.0)];
    let mut edges = vec![
        TalentEdge::new(first_ideal.clone(), stage_id(order, surge, 0)),
        TalentEdge::invisible(first_ideal.clone(), stage_id(order, surge, 0)),
        TalentEdge::invisible(header_id.as_str(), stage_id(order, surge, 0)),
    ];

    for (stage, (rank, level)) in STAGES.iter().enumerate() {
        let parent = match stage {
            0 => first_ideal.clone(),
            n => stage_id(order, surge, n - 1),
        };
        let mut requirements = TalentRequirements::new().talent(parent.clone()).skill(surge, *rank);
        if let Some(level) = level {
            requirements = requirements.level(*level);
        }
        let cost = if stage == 0 {
            ActionCost::OneAction
        } else {
            ActionCost::AlwaysActive
        };
        nodes.push(
            TalentNode::new(stage_id(order, surge, stage), names[stage], cost)
                .describe(format!("{} surge, stage {}.", surge.display_name(), stage + 1))
                .with_requirements(requirements)
                .at(offset, (stage + 1) as f32 * 140.0),
        );
        if stage > 0 {
            edges.push(TalentEdge::new(parent, stage_id(order, surge, stage)));
        }
    }

    TalentTreeData {
        path: order,
        nodes,
        edges,
        subclasses: vec![surge.display_name().to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TalentTree;

    #[test]
    fn fragment_is_anchored_on_the_first_ideal() {
        let anchor = TalentId::new("windrunner_first_ideal");
        let fragment = surge_tree(PathId::Windrunner, Skill::Gravitation, &anchor, 440.0);
        assert_eq!(fragment.nodes.len(), 5);
        assert_eq!(fragment.nodes[1].name, "Basic Lashing");
        assert_eq!(fragment.nodes[4].id, "windrunner_gravitation_4");
        assert_eq!(fragment.edges.iter().filter(|e| e.invisible).count(), 2);
        assert!(fragment.nodes.iter().all(|n| n.position.map(|p| p.x) == Some(440.0)));
    }

    #[test]
    fn fragment_canonicalizes_to_a_chain() {
        let anchor = TalentId::new("windrunner_first_ideal");
        let mut data = surge_tree(PathId::Windrunner, Skill::Gravitation, &anchor, 0.0);
        data.nodes.push(TalentNode::new(anchor.clone(), "First Ideal", ActionCost::Special));
        let tree = TalentTree::from_data(data, anchor).unwrap();
        assert_eq!(tree.canonical_edges().count(), 4);
        assert_eq!(
            tree.prerequisites_of("windrunner_gravitation"),
            vec![&TalentId::new("windrunner_first_ideal")]
        );
    }
}
