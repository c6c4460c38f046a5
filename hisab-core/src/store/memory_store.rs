use super::record_store::{RecordStore, now_millis};
use super::subscribers::Subscribers;
use crate::record::{Entry, EntryKey, ParsedRecord};
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Record store held in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<EntryKey, Entry>>,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<EntryKey, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("memory store is poisoned"))
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, key: &EntryKey) -> Result<Option<Entry>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, record: &ParsedRecord) -> Result<Entry> {
        let entry = Entry::from_record(record, now_millis());
        let mut entries = self.entries()?;
        entries.insert(entry.key(), entry.clone());
        debug!(key = %entry.key(), amount = entry.amount, "stored entry in memory");

        let snapshot: Vec<Entry> = entries.values().cloned().collect();
        if let Err(e) = self.subscribers.notify(&snapshot) {
            warn!(key = %entry.key(), "entry stored but subscribers were not updated: {e:#}");
        }
        Ok(entry)
    }

    fn snapshot(&self) -> Result<Vec<Entry>> {
        Ok(self.entries()?.values().cloned().collect())
    }

    fn subscribe(&self) -> Result<Receiver<Vec<Entry>>> {
        let entries = self.entries()?;
        self.subscribers.add(entries.values().cloned().collect())
    }
}
