use crate::record::Record;
use crate::storage::Storage;
use anyhow::{Context as _, Result};
use std::fmt;
use tracing::{debug, error};

/// The single key holding the JSON-encoded record array.
pub const RECORDS_KEY: &str = "records";

/// Owner of the record list.
///
/// Holds the in-memory records and keeps them persisted through the storage
/// adapter as one JSON array under [`RECORDS_KEY`]. Mutations update the
/// in-memory list and the caller renders from [`RecordStore::records`];
/// storage is only read by [`RecordStore::load`] at startup.
pub struct RecordStore {
    storage: Box<dyn Storage>,
    records: Vec<Record>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records.len())
            .finish()
    }
}

impl RecordStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        RecordStore {
            storage,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the in-memory list with whatever storage holds.
    ///
    /// Absence, unreadable storage and unparsable JSON all degrade to an
    /// empty list; failures are logged, never surfaced. Records with a zero
    /// count are dropped here so arrays written by older versions cannot
    /// reach the display.
    pub async fn load(&mut self) -> &[Record] {
        self.records = match self.storage.get_item(RECORDS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Record>>(&raw) {
                Ok(parsed) => {
                    let total = parsed.len();
                    let records: Vec<Record> =
                        parsed.into_iter().filter(|r| r.count > 0).collect();
                    debug!("loaded {} records ({} stored)", records.len(), total);
                    records
                }
                Err(err) => {
                    error!("failed to parse stored records: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                error!("failed to read records: {}", err);
                Vec::new()
            }
        };
        &self.records
    }

    /// Append a record and persist the updated list.
    ///
    /// Zero-count records are skipped without touching storage. On a write
    /// failure the record stays in memory; the list may diverge from storage
    /// until the next successful write.
    pub async fn append(&mut self, record: Record) -> Result<()> {
        if record.count == 0 {
            debug!("skipping zero-count record");
            return Ok(());
        }
        self.records.push(record);
        self.persist().await
    }

    /// Remove the storage key and empty the list.
    ///
    /// The in-memory list is only cleared after the key was removed, so a
    /// failed clear leaves the visible history unchanged.
    pub async fn clear(&mut self) -> Result<()> {
        self.storage
            .remove_item(RECORDS_KEY)
            .await
            .context("failed to remove records")?;
        self.records.clear();
        Ok(())
    }

    async fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.records).context("failed to encode records")?;
        self.storage
            .set_item(RECORDS_KEY, &raw)
            .await
            .context("failed to write records")?;
        Ok(())
    }
}
