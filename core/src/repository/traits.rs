use crate::model::entry::TrainingEntry;
use anyhow::Result;
use xxhash_rust::xxh3::xxh3_64;

/// Entries as stored at one point in time, with a hash that changes whenever
/// the stored data does.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub entries: Vec<TrainingEntry>,
    pub fingerprint: u64,
}

pub trait EntryRepository {
    fn create(&self, entry: TrainingEntry) -> Result<TrainingEntry>;
    fn get(&self, id: &str) -> Result<TrainingEntry>;
    /// Store order: newest created first.
    fn list(&self) -> Result<Vec<TrainingEntry>>;
    fn update(&self, entry: &TrainingEntry) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;

    fn snapshot(&self) -> Result<Snapshot> {
        let entries = self.list()?;
        let fingerprint = xxh3_64(&serde_json::to_vec(&entries)?);
        Ok(Snapshot {
            entries,
            fingerprint,
        })
    }
}
