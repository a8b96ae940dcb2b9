use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::EntryError;
use crate::model::entry::TrainingEntry;
use crate::repository::traits::{EntryRepository, Snapshot};

const DEFAULT_FILE_NAME: &str = "entries.json";

/// One element of the stored array. Records that do not decode are carried
/// along untouched so that rewriting the file never loses them.
#[derive(Debug, Clone)]
enum StoredRecord {
    Entry(TrainingEntry),
    Undecodable(Value),
}

impl StoredRecord {
    fn entry(&self) -> Option<&TrainingEntry> {
        match self {
            StoredRecord::Entry(entry) => Some(entry),
            StoredRecord::Undecodable(_) => None,
        }
    }

    fn to_value(&self) -> Result<Value> {
        Ok(match self {
            StoredRecord::Entry(entry) => serde_json::to_value(entry)?,
            StoredRecord::Undecodable(value) => value.clone(),
        })
    }
}

fn into_entries(records: Vec<StoredRecord>) -> Vec<TrainingEntry> {
    records
        .into_iter()
        .filter_map(|record| match record {
            StoredRecord::Entry(entry) => Some(entry),
            StoredRecord::Undecodable(_) => None,
        })
        .collect()
}

#[derive(Clone)]
pub struct FileEntryRepository {
    file_path: PathBuf,
}

impl FileEntryRepository {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let path = data_dir.join(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<TrainingEntry>::new())?;
            writer.flush()?;
            debug!("Initialised {}", path.display());
        }

        Ok(FileEntryRepository { file_path: path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        fs::read(&self.file_path)
            .with_context(|| format!("Failed to open {}", self.file_path.display()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<StoredRecord>> {
        let values: Vec<Value> = serde_json::from_slice(bytes)
            .with_context(|| format!("{} is not a JSON array", self.file_path.display()))?;

        Ok(values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match serde_json::from_value::<TrainingEntry>(value.clone()) {
                Ok(entry) => StoredRecord::Entry(entry),
                Err(e) => {
                    warn!("Ignoring stored entry #{}: {}", index, e);
                    StoredRecord::Undecodable(value)
                }
            })
            .collect())
    }

    fn read_records(&self) -> Result<Vec<StoredRecord>> {
        self.decode(&self.read_bytes()?)
    }

    fn read_entries(&self) -> Result<Vec<TrainingEntry>> {
        Ok(into_entries(self.read_records()?))
    }

    fn write_records(&self, records: &[StoredRecord]) -> Result<()> {
        let values = records
            .iter()
            .map(StoredRecord::to_value)
            .collect::<Result<Vec<_>>>()?;
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &values)?;
        writer.flush()?;
        Ok(())
    }
}

impl EntryRepository for FileEntryRepository {
    fn create(&self, entry: TrainingEntry) -> Result<TrainingEntry> {
        let mut records = self.read_records()?;
        records.insert(0, StoredRecord::Entry(entry.clone()));
        self.write_records(&records)?;
        Ok(entry)
    }

    fn get(&self, id: &str) -> Result<TrainingEntry> {
        self.read_entries()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EntryError::NotFound(id.to_string()).into())
    }

    fn list(&self) -> Result<Vec<TrainingEntry>> {
        self.read_entries()
    }

    fn update(&self, entry: &TrainingEntry) -> Result<()> {
        let mut records = self.read_records()?;
        let pos = records
            .iter()
            .position(|r| r.entry().is_some_and(|e| e.id == entry.id));
        match pos {
            Some(pos) => {
                records[pos] = StoredRecord::Entry(entry.clone());
                self.write_records(&records)
            }
            None => Err(EntryError::NotFound(entry.id.clone()).into()),
        }
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.read_records()?;
        let initial_len = records.len();
        records.retain(|r| r.entry().map_or(true, |e| e.id != id));

        if records.len() == initial_len {
            return Err(EntryError::NotFound(id.to_string()).into());
        }

        self.write_records(&records)?;
        Ok(())
    }

    /// Hashes the file bytes read for the listing, so no re-serialisation is needed.
    fn snapshot(&self) -> Result<Snapshot> {
        let bytes = self.read_bytes()?;
        Ok(Snapshot {
            entries: into_entries(self.decode(&bytes)?),
            fingerprint: xxh3_64(&bytes),
        })
    }
}
