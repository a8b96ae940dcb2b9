//! Static technique lists offered by the tag picker, and the glossary shown
//! in the learning view.

use crate::model::category::Category;
use crate::model::label::{Side, TechniqueLabel};

pub const BASE_SUBMISSIONS: &[&str] = &[
    "Triangle Choke",
    "Armbar",
    "Ezekiel Choke",
    "Kimura",
    "Guillotine Choke",
    "Rear Naked Choke",
    "Cross Collar Choke",
    "Omoplata",
    "Americana",
    "Bow and Arrow Choke",
    "North South Choke",
    "Paper Cutter Choke",
    "Arm Triangle",
    "Anaconda Choke",
    "D'Arce Choke",
    "Peruvian Necktie",
    "Gogoplata",
    "Calf Slicer",
    "Heel Hook",
    "Ankle Lock",
    "Kneebar",
    "Straight Ankle Lock",
    "Achilles Lock",
    "Inside Heel Hook",
    "Outside Heel Hook",
    "Other",
];

pub const BASE_SWEEPS: &[&str] = &[
    "Scissor Sweep",
    "Hip Bump Sweep",
    "Flower Sweep",
    "Lumberjack Sweep",
    "Pendulum Sweep",
    "X-Guard Sweep",
    "Tripod Sweep",
    "Sit-up Sweep",
    "Tornado Sweep",
    "Butterfly Sweep",
    "Tomiya Sweep",
    "Balloon Sweep",
    "Other",
];

pub const BASE_POSITIONS: &[&str] = &[
    "Mount",
    "Back Control",
    "Side Control",
    "Knee on Belly",
    "North-South",
    "Closed Guard",
    "Open Guard",
    "Half Guard",
    "Turtle",
    "Crucifix",
    "50/50",
    "De La Riva",
    "Spider Guard",
    "Other",
];

pub fn base_techniques(category: Category) -> &'static [&'static str] {
    match category {
        Category::SubmissionsGot | Category::SubmissionsReceived => BASE_SUBMISSIONS,
        Category::Sweeps => BASE_SWEEPS,
        Category::DominantPositions => BASE_POSITIONS,
    }
}

/// Left and right variant of every name, in order: `A (L)`, `A (R)`, `B (L)`...
pub fn with_sides(names: &[&str]) -> Vec<TechniqueLabel> {
    names
        .iter()
        .flat_map(|name| {
            [
                TechniqueLabel::new(*name, Some(Side::L)),
                TechniqueLabel::new(*name, Some(Side::R)),
            ]
        })
        .collect()
}

/// Tag picker choices for a category.
pub fn picker_choices(category: Category) -> Vec<TechniqueLabel> {
    with_sides(base_techniques(category))
}

pub struct GlossaryGroup {
    pub name: &'static str,
    pub techniques: &'static [&'static str],
}

pub struct GlossarySection {
    pub name: &'static str,
    pub groups: &'static [GlossaryGroup],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryItem {
    pub section: &'static str,
    pub group: &'static str,
    pub technique: &'static str,
}

pub const GLOSSARY: &[GlossarySection] = &[
    GlossarySection {
        name: "Guard",
        groups: &[
            GlossaryGroup {
                name: "Closed Guard",
                techniques: &[
                    "Triangle Choke",
                    "Armbar from Guard",
                    "Kimura from Guard",
                    "Guillotine Choke",
                    "Cross Collar Choke",
                    "Omoplata",
                    "Hip Bump Sweep",
                    "Scissor Sweep",
                ],
            },
            GlossaryGroup {
                name: "Open Guard",
                techniques: &[
                    "Butterfly Guard Sweeps",
                    "Spider Guard",
                    "Lasso Guard",
                    "De La Riva Guard",
                    "Worm Guard",
                    "X-Guard",
                    "Single Leg X",
                    "Half Guard Sweeps",
                ],
            },
            GlossaryGroup {
                name: "Half Guard",
                techniques: &[
                    "Lock Down",
                    "Electric Chair Sweep",
                    "Old School Sweep",
                    "Plan B Sweep",
                    "Half Guard Passes",
                ],
            },
        ],
    },
    GlossarySection {
        name: "Side Control",
        groups: &[
            GlossaryGroup {
                name: "Escapes",
                techniques: &[
                    "Bridge and Roll",
                    "Shrimp Escape",
                    "Knee to Elbow Escape",
                    "Trap and Roll",
                ],
            },
            GlossaryGroup {
                name: "Submissions",
                techniques: &[
                    "Americana",
                    "Kimura",
                    "Arm Triangle",
                    "North South Choke",
                    "Paper Cutter Choke",
                ],
            },
        ],
    },
    GlossarySection {
        name: "Mount",
        groups: &[
            GlossaryGroup {
                name: "Escapes",
                techniques: &["Bridge and Roll", "Elbow Escape", "Trap and Roll"],
            },
            GlossaryGroup {
                name: "Submissions",
                techniques: &[
                    "Cross Collar Choke",
                    "Armbar from Mount",
                    "Triangle from Mount",
                    "Americana from Mount",
                ],
            },
        ],
    },
    GlossarySection {
        name: "Back Control",
        groups: &[
            GlossaryGroup {
                name: "Submissions",
                techniques: &[
                    "Rear Naked Choke",
                    "Bow and Arrow Choke",
                    "Cross Collar Choke",
                    "Armbar from Back",
                    "Triangle from Back",
                ],
            },
            GlossaryGroup {
                name: "Control",
                techniques: &["Body Triangle", "Seat Belt Grip", "Hooks Control"],
            },
        ],
    },
    GlossarySection {
        name: "Takedowns",
        groups: &[
            GlossaryGroup {
                name: "Single Leg",
                techniques: &["Single Leg Takedown", "High Crotch", "Low Single"],
            },
            GlossaryGroup {
                name: "Double Leg",
                techniques: &["Double Leg Takedown", "Blast Double"],
            },
            GlossaryGroup {
                name: "Throws",
                techniques: &["Hip Toss", "Uchi Mata", "Seoi Nage", "Tai Otoshi"],
            },
        ],
    },
    GlossarySection {
        name: "Leg Locks",
        groups: &[
            GlossaryGroup {
                name: "Heel Hooks",
                techniques: &["Inside Heel Hook", "Outside Heel Hook", "Calf Slicer"],
            },
            GlossaryGroup {
                name: "Ankle Locks",
                techniques: &["Straight Ankle Lock", "Achilles Lock"],
            },
            GlossaryGroup {
                name: "Knee Bars",
                techniques: &["Kneebar from Guard", "Kneebar from Top"],
            },
        ],
    },
];

pub fn glossary_items() -> impl Iterator<Item = GlossaryItem> {
    GLOSSARY.iter().flat_map(|section| {
        section.groups.iter().flat_map(move |group| {
            group.techniques.iter().map(move |technique| GlossaryItem {
                section: section.name,
                group: group.name,
                technique: *technique,
            })
        })
    })
}

/// Case-insensitive match on technique, group or section name.
pub fn search_glossary(term: &str) -> Vec<GlossaryItem> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    glossary_items()
        .filter(|item| {
            item.technique.to_lowercase().contains(&term)
                || item.group.to_lowercase().contains(&term)
                || item.section.to_lowercase().contains(&term)
        })
        .collect()
}
