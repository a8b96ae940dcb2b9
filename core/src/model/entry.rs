use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::model::category::Category;
use crate::model::label::TechniqueLabel;
use crate::time::parse_hours;

/// One logged training session.
///
/// `mat_hours` keeps the text the user typed; [`TrainingEntry::hours`] is the
/// only place it is interpreted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEntry {
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "text_number_or_null")]
    pub mat_hours: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submissions_got: Vec<TechniqueLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub submissions_received: Vec<TechniqueLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sweeps: Vec<TechniqueLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dominant_positions: Vec<TechniqueLabel>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

impl TrainingEntry {
    pub fn new(date: NaiveDate, mat_hours: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            mat_hours: mat_hours.into(),
            submissions_got: Vec::new(),
            submissions_received: Vec::new(),
            sweeps: Vec::new(),
            dominant_positions: Vec::new(),
            notes: String::new(),
        }
    }

    /// Hours on the mat, 0 when the stored value is missing or unparseable.
    pub fn hours(&self) -> f64 {
        parse_hours(&self.mat_hours)
    }

    pub fn labels(&self, category: Category) -> &[TechniqueLabel] {
        match category {
            Category::SubmissionsGot => &self.submissions_got,
            Category::SubmissionsReceived => &self.submissions_received,
            Category::Sweeps => &self.sweeps,
            Category::DominantPositions => &self.dominant_positions,
        }
    }

    pub fn labels_mut(&mut self, category: Category) -> &mut Vec<TechniqueLabel> {
        match category {
            Category::SubmissionsGot => &mut self.submissions_got,
            Category::SubmissionsReceived => &mut self.submissions_received,
            Category::Sweeps => &mut self.sweeps,
            Category::DominantPositions => &mut self.dominant_positions,
        }
    }
}

/// Form-side state for an entry that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub date: Option<NaiveDate>,
    pub mat_hours: String,
    pub submissions_got: Vec<TechniqueLabel>,
    pub submissions_received: Vec<TechniqueLabel>,
    pub sweeps: Vec<TechniqueLabel>,
    pub dominant_positions: Vec<TechniqueLabel>,
    pub notes: String,
}

impl EntryDraft {
    pub fn new(date: NaiveDate, mat_hours: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            mat_hours: mat_hours.into(),
            ..Self::default()
        }
    }

    /// Adds a tag to the draft. A tag already present is ignored, matching
    /// the tag picker which refuses the same technique twice per session.
    pub fn add_label(&mut self, category: Category, label: TechniqueLabel) -> bool {
        let list = self.labels_mut(category);
        if list.contains(&label) {
            return false;
        }
        list.push(label);
        true
    }

    pub fn labels_mut(&mut self, category: Category) -> &mut Vec<TechniqueLabel> {
        match category {
            Category::SubmissionsGot => &mut self.submissions_got,
            Category::SubmissionsReceived => &mut self.submissions_received,
            Category::Sweeps => &mut self.sweeps,
            Category::DominantPositions => &mut self.dominant_positions,
        }
    }

    pub fn from_entry(entry: &TrainingEntry) -> Self {
        Self {
            date: Some(entry.date),
            mat_hours: entry.mat_hours.clone(),
            submissions_got: entry.submissions_got.clone(),
            submissions_received: entry.submissions_received.clone(),
            sweeps: entry.sweeps.clone(),
            dominant_positions: entry.dominant_positions.clone(),
            notes: entry.notes.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

// The web client stored numeric ids (`Date.now()`) and sometimes numeric hours.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(n) => n.to_string(),
        TextOrNumber::Float(f) => f.to_string(),
    })
}

// A null hours field is an empty form field: it counts as 0 hours.
fn text_number_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Integer(n)) => n.to_string(),
        Some(TextOrNumber::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
