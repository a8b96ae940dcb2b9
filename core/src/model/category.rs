use serde::{Deserialize, Serialize};

/// The four tag lists recorded on every entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    SubmissionsGot,
    SubmissionsReceived,
    Sweeps,
    DominantPositions,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::SubmissionsGot,
        Category::SubmissionsReceived,
        Category::Sweeps,
        Category::DominantPositions,
    ];

    /// Categories whose L/R split is reported.
    pub fn is_side_aware(&self) -> bool {
        !matches!(self, Category::DominantPositions)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::SubmissionsGot => "Submissions You Got",
            Category::SubmissionsReceived => "Submissions Done On You",
            Category::Sweeps => "Sweeps",
            Category::DominantPositions => "Dominant Positions",
        }
    }
}
