use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RankedLabel {
    pub label: String,
    pub count: usize,
}

/// Occurrence counts keyed by exact label text.
///
/// Keys are kept in the order they were first seen so that ranking can break
/// ties by first appearance with a stable sort.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<RankedLabel>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for label in labels {
            table.add(label.as_ref());
        }
        table
    }

    pub fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(RankedLabel {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&pos| self.entries[pos].count)
            .unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of recorded events.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Labels in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &RankedLabel> {
        self.entries.iter()
    }

    /// Descending by count; equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<RankedLabel> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    pub fn top(&self, n: usize) -> Vec<RankedLabel> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    pub fn most_common(&self) -> Option<RankedLabel> {
        // max_by_key returns the last maximum; scan manually to keep the first
        let mut best: Option<&RankedLabel> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best.cloned()
    }
}
