use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::error::EntryError;
use crate::model::category::Category;
use crate::model::entry::EntryDraft;
use crate::model::label::TechniqueLabel;
use crate::time::parse_entry_date;

pub const ENTRY_KEYS: &[&str] = &["date", "hours", "got", "received", "sweep", "position", "notes"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    /// `key:value` pairs in the order given; keys may repeat.
    pub fields: Vec<(String, String)>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut text_parts = Vec::new();
    let mut fields = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !key.contains(' ') {
                fields.push((key.to_string(), value.trim().to_string()));
                continue;
            }
        }
        text_parts.push(arg.as_str());
    }

    ParsedInput {
        text: text_parts.join(" "),
        fields,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(EntryError::UnknownField(key.to_string()).into()),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds a draft from `add` arguments. Words that are not `key:value` pairs
/// become the notes, after any explicit `notes:` value.
///
/// Missing date defaults to `today`; hours are left for the service to check.
pub fn build_draft(parsed: &ParsedInput, today: NaiveDate) -> Result<EntryDraft> {
    let mut draft = EntryDraft {
        date: Some(today),
        ..EntryDraft::default()
    };
    apply_fields(&mut draft, parsed, today)?;
    Ok(draft)
}

/// Applies parsed fields on top of an existing draft: scalar fields are
/// replaced, technique tags are appended, notes are replaced only when given.
pub fn apply_fields(draft: &mut EntryDraft, parsed: &ParsedInput, today: NaiveDate) -> Result<()> {
    let mut notes = Vec::new();

    for (key, value) in &parsed.fields {
        let key = expand_key(&key.to_lowercase(), ENTRY_KEYS)?;
        match key.as_str() {
            "date" => draft.date = Some(parse_entry_date(value, today)?),
            "hours" => draft.mat_hours = value.clone(),
            "notes" => notes.push(value.clone()),
            field => {
                let category = field_category(field)?;
                if !value.is_empty() {
                    draft.add_label(category, TechniqueLabel::parse(value));
                }
            }
        }
    }

    if !parsed.text.is_empty() {
        notes.push(parsed.text.clone());
    }
    if !notes.is_empty() {
        draft.notes = notes.join(" ");
    }
    Ok(())
}

fn field_category(field: &str) -> Result<Category> {
    match field {
        "got" => Ok(Category::SubmissionsGot),
        "received" => Ok(Category::SubmissionsReceived),
        "sweep" => Ok(Category::Sweeps),
        "position" => Ok(Category::DominantPositions),
        other => Err(EntryError::UnknownField(other.to_string()).into()),
    }
}
