/// Static catalog of the capabilities a task can be tagged with
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Skill {
    Planner,
    DataWizard,
    DiagramBuilder,
    WebResearcher,
    DocumentGenerator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillInfo {
    pub id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

pub const SKILLS: [(Skill, SkillInfo); 5] = [
    (
        Skill::Planner,
        SkillInfo {
            id: "planner",
            icon: "◆",
            label: "Planner",
            hint: "Strategic reasoning & multi-step planning",
        },
    ),
    (
        Skill::DataWizard,
        SkillInfo {
            id: "data-wizard",
            icon: "∑",
            label: "Data Wizard",
            hint: "Data extraction, parsing & analysis",
        },
    ),
    (
        Skill::DiagramBuilder,
        SkillInfo {
            id: "diagram-builder",
            icon: "⊞",
            label: "Diagram Builder",
            hint: "Charts, flowcharts & visualizations",
        },
    ),
    (
        Skill::WebResearcher,
        SkillInfo {
            id: "web-researcher",
            icon: "◎",
            label: "Web Researcher",
            hint: "Web scraping, browsing & research",
        },
    ),
    (
        Skill::DocumentGenerator,
        SkillInfo {
            id: "document-generator",
            icon: "≡",
            label: "Doc Generator",
            hint: "Reports, docs & structured output",
        },
    ),
];

impl Skill {
    pub fn info(&self) -> &'static SkillInfo {
        match self {
            Self::Planner => &SKILLS[0].1,
            Self::DataWizard => &SKILLS[1].1,
            Self::DiagramBuilder => &SKILLS[2].1,
            Self::WebResearcher => &SKILLS[3].1,
            Self::DocumentGenerator => &SKILLS[4].1,
        }
    }

    pub fn from_id(id: &str) -> Option<Skill> {
        SKILLS
            .iter()
            .find(|(_, info)| info.id == id)
            .map(|(skill, _)| *skill)
    }
}
