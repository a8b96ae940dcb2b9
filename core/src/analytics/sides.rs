use serde::{Deserialize, Serialize};

use crate::analytics::frequency::{FrequencyTable, RankedLabel};
use crate::model::label::{Side, TechniqueLabel};

/// Where a label without an `(L)`/`(R)` suffix is counted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SidePolicy {
    /// Unmarked labels go to the left bucket, as the mobile app always did.
    #[default]
    Compat,
    /// Unmarked labels are tracked separately.
    Strict,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideCounts {
    pub left: usize,
    pub right: usize,
    pub unmarked: usize,
}

impl SideCounts {
    pub fn total(&self) -> usize {
        self.left + self.right + self.unmarked
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TechniqueSides {
    pub name: String,
    pub counts: SideCounts,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SideSplit {
    /// Per base technique, in first-seen order.
    pub techniques: Vec<TechniqueSides>,
    pub totals: SideCounts,
    pub top_left: Option<RankedLabel>,
    pub top_right: Option<RankedLabel>,
}

impl SideSplit {
    pub fn technique(&self, name: &str) -> Option<&SideCounts> {
        self.techniques
            .iter()
            .find(|t| t.name == name)
            .map(|t| &t.counts)
    }
}

pub fn split_by_side<'a, I>(labels: I, policy: SidePolicy) -> SideSplit
where
    I: IntoIterator<Item = &'a TechniqueLabel>,
{
    let mut split = SideSplit::default();
    let mut left = FrequencyTable::new();
    let mut right = FrequencyTable::new();

    for label in labels {
        let base = label.base_name();
        let pos = match split.techniques.iter().position(|t| t.name == base) {
            Some(pos) => pos,
            None => {
                split.techniques.push(TechniqueSides {
                    name: base.to_string(),
                    counts: SideCounts::default(),
                });
                split.techniques.len() - 1
            }
        };
        let counts = &mut split.techniques[pos].counts;

        match (label.side, policy) {
            (Some(Side::L), _) | (None, SidePolicy::Compat) => {
                counts.left += 1;
                split.totals.left += 1;
                left.add(base);
            }
            (Some(Side::R), _) => {
                counts.right += 1;
                split.totals.right += 1;
                right.add(base);
            }
            (None, SidePolicy::Strict) => {
                counts.unmarked += 1;
                split.totals.unmarked += 1;
            }
        }
    }

    split.top_left = left.most_common();
    split.top_right = right.most_common();
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<TechniqueLabel> {
        raw.iter().map(|r| TechniqueLabel::parse(r)).collect()
    }

    #[test]
    fn test_split_groups_by_base_name() {
        let labels = labels(&["Armbar (L)", "Armbar (R)", "Armbar (L)", "Kimura (R)"]);
        let split = split_by_side(&labels, SidePolicy::Compat);

        let armbar = split.technique("Armbar").unwrap();
        assert_eq!((armbar.left, armbar.right), (2, 1));
        let kimura = split.technique("Kimura").unwrap();
        assert_eq!((kimura.left, kimura.right), (0, 1));

        assert_eq!(split.totals.left, 2);
        assert_eq!(split.totals.right, 2);
        assert_eq!(split.top_left.as_ref().unwrap().label, "Armbar");
        // Armbar and Kimura tie on the right, Armbar seen first on that side
        assert_eq!(split.top_right.as_ref().unwrap().label, "Armbar");
    }

    #[test]
    fn test_compat_policy_counts_unmarked_as_left() {
        let labels = labels(&["Omoplata", "Omoplata (R)"]);
        let split = split_by_side(&labels, SidePolicy::Compat);
        let counts = split.technique("Omoplata").unwrap();
        assert_eq!(*counts, SideCounts { left: 1, right: 1, unmarked: 0 });
        assert_eq!(split.totals.left + split.totals.right, labels.len());
    }

    #[test]
    fn test_strict_policy_tracks_unmarked() {
        let labels = labels(&["Omoplata", "Omoplata (R)"]);
        let split = split_by_side(&labels, SidePolicy::Strict);
        let counts = split.technique("Omoplata").unwrap();
        assert_eq!(*counts, SideCounts { left: 0, right: 1, unmarked: 1 });
        assert!(split.top_left.is_none());
        assert_eq!(split.totals.total(), labels.len());
    }

    #[test]
    fn test_top_by_side_uses_side_order() {
        let labels = labels(&["Kimura (R)", "Triangle (L)", "Kimura (L)"]);
        let split = split_by_side(&labels, SidePolicy::Compat);
        assert_eq!(split.top_left.unwrap().label, "Triangle");
        assert_eq!(split.techniques[0].name, "Kimura");
    }

    #[test]
    fn test_empty_split() {
        let split = split_by_side(&Vec::<TechniqueLabel>::new(), SidePolicy::Compat);
        assert!(split.techniques.is_empty());
        assert_eq!(split.totals, SideCounts::default());
        assert!(split.top_left.is_none() && split.top_right.is_none());
    }
}
