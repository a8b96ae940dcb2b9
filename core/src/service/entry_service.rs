use crate::error::EntryError;
use crate::model::entry::{EntryDraft, TrainingEntry};
use crate::repository::EntryRepository;
use anyhow::Result;
use tracing::info;

pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves a new session. Date and mat hours are required.
    pub fn add_entry(&self, draft: EntryDraft) -> Result<TrainingEntry> {
        let date = validate(&draft)?;
        let mut entry = TrainingEntry::new(date, draft.mat_hours.trim());
        apply_draft(&mut entry, draft);

        let created = self.repo.create(entry)?;
        info!(id = %created.id, date = %created.date, "Logged training session");
        Ok(created)
    }

    /// Replaces every field of an existing entry; the id is kept.
    pub fn update_entry(&self, id: &str, draft: EntryDraft) -> Result<TrainingEntry> {
        let date = validate(&draft)?;
        let mut entry = self.repo.get(id)?;
        entry.date = date;
        entry.mat_hours = draft.mat_hours.trim().to_string();
        apply_draft(&mut entry, draft);

        self.repo.update(&entry)?;
        info!(id = %entry.id, "Updated training session");
        Ok(entry)
    }

    pub fn delete_entry(&self, id: &str) -> Result<()> {
        self.repo.delete(id)?;
        info!(id, "Deleted training session");
        Ok(())
    }

    pub fn get_entry(&self, id: &str) -> Result<TrainingEntry> {
        self.repo.get(id)
    }

    pub fn list_entries(&self) -> Result<Vec<TrainingEntry>> {
        self.repo.list()
    }

    /// Resolves a unique id prefix, as typed on the command line.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<TrainingEntry> {
        let mut matches: Vec<TrainingEntry> = self
            .repo
            .list()?
            .into_iter()
            .filter(|e| e.id.starts_with(prefix))
            .collect();

        // An exact id always wins over longer ids sharing it as a prefix
        if let Some(pos) = matches.iter().position(|e| e.id == prefix) {
            return Ok(matches.swap_remove(pos));
        }

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(EntryError::NotFound(prefix.to_string()).into()),
            count => Err(EntryError::AmbiguousId {
                prefix: prefix.to_string(),
                count,
            }
            .into()),
        }
    }
}

fn validate(draft: &EntryDraft) -> Result<chrono::NaiveDate, EntryError> {
    let date = draft.date.ok_or(EntryError::MissingDate)?;
    if draft.mat_hours.trim().is_empty() {
        return Err(EntryError::MissingHours);
    }
    Ok(date)
}

fn apply_draft(entry: &mut TrainingEntry, draft: EntryDraft) {
    entry.submissions_got = draft.submissions_got;
    entry.submissions_received = draft.submissions_received;
    entry.sweeps = draft.sweeps;
    entry.dominant_positions = draft.dominant_positions;
    entry.notes = draft.notes;
}
