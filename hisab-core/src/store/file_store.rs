//! Record store kept on disk as one TOML file per month.
//!
//! ```toml
//! # {root}/2025/05.toml
//! [entries.2025-05-26_evening]
//! date = "2025-05-26"
//! shift = "evening"
//! amount = 126.56
//! timestamp = 1748275200000
//! ```

use super::record_store::{RecordStore, now_millis};
use super::store_paths::{month_file, scan_dir_for_toml_files};
use super::subscribers::Subscribers;
use crate::record::{Entry, EntryKey, ParsedRecord};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::sync::mpsc::Receiver;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct MonthFile {
    #[serde(default)]
    entries: BTreeMap<EntryKey, Entry>,
}

#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
    subscribers: Subscribers,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).with_context(|| format!("creating {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
            write_lock: Mutex::new(()),
            subscribers: Subscribers::default(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serializes writers, and subscribers against writers.
    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| anyhow!("file store lock is poisoned"))
    }

    fn read_month_file(path: &Path) -> Result<MonthFile> {
        if !path.exists() {
            return Ok(MonthFile::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn write_month_file(path: &Path, month: &MonthFile) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating parent directory {}", parent.display()))?;
        }
        let content = toml::to_string(month)
            .with_context(|| format!("serializing entries for {}", path.display()))?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }
}

impl RecordStore for FileStore {
    fn read(&self, key: &EntryKey) -> Result<Option<Entry>> {
        let path = month_file(&self.root, key.date);
        let mut month = Self::read_month_file(&path)?;
        Ok(month.entries.remove(key))
    }

    fn write(&self, record: &ParsedRecord) -> Result<Entry> {
        let entry = Entry::from_record(record, now_millis());
        let path = month_file(&self.root, entry.date);
        let _guard = self.lock()?;
        let mut month = Self::read_month_file(&path)?;
        month.entries.insert(entry.key(), entry.clone());
        Self::write_month_file(&path, &month)?;
        info!(key = %entry.key(), amount = entry.amount, path = %path.display(), "saved entry");

        // The entry is on disk from here on; a failed update must not undo that.
        if let Err(e) = self.snapshot().and_then(|all| self.subscribers.notify(&all)) {
            warn!(key = %entry.key(), "entry saved but subscribers were not updated: {e:#}");
        }
        Ok(entry)
    }

    fn snapshot(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for path in scan_dir_for_toml_files(&self.root)? {
            let month = Self::read_month_file(&path)?;
            entries.extend(month.entries.into_values());
        }
        entries.sort_by_key(Entry::key);
        Ok(entries)
    }

    fn subscribe(&self) -> Result<Receiver<Vec<Entry>>> {
        let _guard = self.lock()?;
        self.subscribers.add(self.snapshot()?)
    }
}
