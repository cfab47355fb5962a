use super::{info, surge_tree, TreeBuilder, COLUMN_WIDTH};
use crate::entities::{ActionCost, PathId, PathInfo, TalentNode, TalentRequirements as Req};
use crate::ids::TalentId;
use crate::rules::TalentTreeData;
use crate::value_objects::{Attribute, Skill};

struct Order {
    path: PathId,
    name: &'static str,
    description: &'static str,
    surges: [Skill; 2],
    attributes: [Attribute; 2],
}

const ORDERS: [Order; 9] = [
    Order {
        path: PathId::Windrunner,
        name: "Windrunner",
        description: "Radiants who protect those who cannot protect themselves.",
        surges: [Skill::Adhesion, Skill::Gravitation],
        attributes: [Attribute::Presence, Attribute::Awareness],
    },
    Order {
        path: PathId::Skybreaker,
        name: "Skybreaker",
        description: "Radiants who seek justice through law.",
        surges: [Skill::Gravitation, Skill::Division],
        attributes: [Attribute::Awareness, Attribute::Willpower],
    },
    Order {
        path: PathId::Dustbringer,
        name: "Dustbringer",
        description: "Radiants who master destructive power through discipline.",
        surges: [Skill::Division, Skill::Abrasion],
        attributes: [Attribute::Willpower, Attribute::Speed],
    },
    Order {
        path: PathId::Edgedancer,
        name: "Edgedancer",
        description: "Radiants who remember those who are forgotten.",
        surges: [Skill::Abrasion, Skill::Progression],
        attributes: [Attribute::Speed, Attribute::Awareness],
    },
    Order {
        path: PathId::Truthwatcher,
        name: "Truthwatcher",
        description: "Radiants who seek truth and heal wounds.",
        surges: [Skill::Progression, Skill::Illumination],
        attributes: [Attribute::Awareness, Attribute::Intellect],
    },
    Order {
        path: PathId::Lightweaver,
        name: "Lightweaver",
        description: "Radiants who speak truths about themselves through illusion.",
        surges: [Skill::Illumination, Skill::Transformation],
        attributes: [Attribute::Presence, Attribute::Intellect],
    },
    Order {
        path: PathId::Elsecaller,
        name: "Elsecaller",
        description: "Radiants who strive to reach their full potential.",
        surges: [Skill::Transformation, Skill::Transportation],
        attributes: [Attribute::Intellect, Attribute::Willpower],
    },
    Order {
        path: PathId::Willshaper,
        name: "Willshaper",
        description: "Radiants who champion freedom.",
        surges: [Skill::Transportation, Skill::Cohesion],
        attributes: [Attribute::Presence, Attribute::Speed],
    },
    Order {
        path: PathId::Stoneward,
        name: "Stoneward",
        description: "Radiants who stand firm so others need not.",
        surges: [Skill::Cohesion, Skill::Tension],
        attributes: [Attribute::Strength, Attribute::Willpower],
    },
];

pub(super) fn paths() -> Vec<(PathInfo, TalentTreeData)> {
    ORDERS.iter().map(order_path).collect()
}

fn order_path(order: &Order) -> (PathInfo, TalentTreeData) {
    let prefix = order.path.as_str();
    let first = TalentId::new(format!("{}_first_ideal", prefix));
    let second = format!("{}_second_ideal", prefix);
    let third = format!("{}_third_ideal", prefix);

    let info = info(
        order.path,
        order.name,
        order.description,
        first.as_str(),
        &order.attributes,
        &order.surges,
        None,
    );

    let key = TalentNode::new(first.clone(), "First Ideal", ActionCost::Special)
        .describe("Life before death, strength before weakness, journey before destination.")
        .with_requirements(Req::new().other("Speak the First Ideal"));

    let tree = TreeBuilder::new(order.path, key)
        .subclass(&format!("{}_ideals", prefix), "Ideals")
        .under(
            first.as_str(),
            TalentNode::new(second.as_str(), "Second Ideal", ActionCost::AlwaysActive)
                .describe(format!("Swear the Second Ideal of the {}s.", order.name))
                .with_requirements(
                    Req::new()
                        .talent(first.clone())
                        .level(2)
                        .other("Speak the Second Ideal"),
                ),
        )
        .under(
            second.as_str(),
            TalentNode::new(third.as_str(), "Third Ideal", ActionCost::AlwaysActive)
                .describe(format!("Swear the Third Ideal of the {}s.", order.name))
                .with_requirements(
                    Req::new()
                        .talent(second.as_str())
                        .level(5)
                        .other("Speak the Third Ideal"),
                ),
        )
        .merge(surge_tree(order.path, order.surges[0], &first, 2.0 * COLUMN_WIDTH))
        .merge(surge_tree(order.path, order.surges[1], &first, 3.0 * COLUMN_WIDTH))
        .build();

    (info, tree)
}
