use crate::record::{Entry, EntryKey, ParsedRecord};
use anyhow::Result;
use chrono::Utc;
use std::sync::mpsc::Receiver;

/// Key-value store of entries, keyed by `${date}_${shift}`.
///
/// Writes are last-write-wins; callers that must not clobber an existing entry
/// read first (see [`save_record`](super::save_record)).
pub trait RecordStore {
    /// Returns the entry stored under `key`, if any.
    fn read(&self, key: &EntryKey) -> Result<Option<Entry>>;

    /// Stores `record` under `record.key()`, stamping the write time.
    /// Returns the entry as stored.
    fn write(&self, record: &ParsedRecord) -> Result<Entry>;

    /// Every stored entry, in key order.
    fn snapshot(&self) -> Result<Vec<Entry>>;

    /// A stream of full snapshots: the current one right away, then a new one
    /// after every mutation.
    fn subscribe(&self) -> Result<Receiver<Vec<Entry>>>;
}

/// Current time in milliseconds since the Unix epoch, used as the write stamp.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
