use super::{info, TreeBuilder};
use crate::entities::{ActionCost as Cost, PathId, PathInfo, TalentEdge, TalentNode, TalentRequirements as Req};
use crate::rules::TalentTreeData;
use crate::value_objects::{Attribute, Skill};

const VOIDSPREN: &str = "Bond a Voidspren during an Everstorm";

pub(super) fn path() -> (PathInfo, TalentTreeData) {
    let info = info(
        PathId::Singer,
        "Singer",
        "Forms available to singers, who change form by bonding spren in a highstorm.",
        "change_form",
        &[Attribute::Strength, Attribute::Awareness],
        &[Skill::Survival, Skill::Athletics],
        None,
    );

    let tree = TreeBuilder::new(
        PathId::Singer,
        TalentNode::new("change_form", "Change Form", Cost::Special)
            .describe("Change between dullform, mateform and any forms you know during a highstorm."),
    )
    .subclass("singer_finesse", "Forms of Finesse")
    .under("change_form", TalentNode::new("forms_of_finesse", "Forms of Finesse", Cost::AlwaysActive)
        .describe("Learn artform and nimbleform.")
        .with_requirements(Req::new().talent("change_form")))
    .under("forms_of_finesse", TalentNode::new("forms_of_mystery", "Forms of Mystery", Cost::AlwaysActive)
        .describe("Learn mediationform and shadowform.")
        .with_requirements(Req::new().talent("forms_of_finesse").level(5).other(VOIDSPREN)))
    .subclass("singer_wisdom", "Forms of Wisdom")
    .under("change_form", TalentNode::new("forms_of_wisdom", "Forms of Wisdom", Cost::AlwaysActive)
        .describe("Learn scholarform and mediationform.")
        .with_requirements(Req::new().talent("change_form")))
    .under("forms_of_wisdom", TalentNode::new("forms_of_expansion", "Forms of Expansion", Cost::AlwaysActive)
        .describe("Learn envoyform and relayform.")
        .with_requirements(Req::new().talent("forms_of_wisdom").level(5).other(VOIDSPREN)))
    .subclass("singer_resolve", "Forms of Resolve")
    .under("change_form", TalentNode::new("forms_of_resolve", "Forms of Resolve", Cost::AlwaysActive)
        .describe("Learn warform and workform.")
        .with_requirements(Req::new().talent("change_form").attribute(Attribute::Strength, 2)))
    .under("forms_of_resolve", TalentNode::new("forms_of_destruction", "Forms of Destruction", Cost::AlwaysActive)
        .describe("Learn direform and stormform.")
        .with_requirements(Req::new().talent("forms_of_resolve").level(10).other(VOIDSPREN)))
    .edge(TalentEdge::invisible("forms_of_resolve", "forms_of_destruction"))
    .build();

    (info, tree)
}
