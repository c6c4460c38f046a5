use super::record_store::RecordStore;
use crate::record::{Entry, ParsedRecord};
use anyhow::Result;
use tracing::debug;

/// What happened to a record handed to [`save_record`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Nothing was stored under the key before.
    Created(Entry),
    /// The user confirmed replacing `previous`.
    Overwritten { previous: Entry, entry: Entry },
    /// The user declined to replace `existing`; the store is untouched.
    Cancelled { existing: Entry },
}

impl SaveOutcome {
    pub fn entry(&self) -> &Entry {
        match self {
            SaveOutcome::Created(entry) => entry,
            SaveOutcome::Overwritten { entry, .. } => entry,
            SaveOutcome::Cancelled { existing } => existing,
        }
    }

    pub fn is_saved(&self) -> bool {
        !matches!(self, SaveOutcome::Cancelled { .. })
    }
}

/// Saves `record`, asking before it replaces an existing entry.
///
/// Reads the key first. If an entry is already there, `confirm_overwrite` gets
/// it and the write only happens when it returns `true`.
pub fn save_record<F>(
    store: &dyn RecordStore,
    record: &ParsedRecord,
    confirm_overwrite: F,
) -> Result<SaveOutcome>
where
    F: FnOnce(&Entry) -> bool,
{
    let key = record.key();
    match store.read(&key)? {
        None => Ok(SaveOutcome::Created(store.write(record)?)),
        Some(existing) => {
            if !confirm_overwrite(&existing) {
                debug!(%key, "overwrite cancelled");
                return Ok(SaveOutcome::Cancelled { existing });
            }
            let entry = store.write(record)?;
            Ok(SaveOutcome::Overwritten {
                previous: existing,
                entry,
            })
        }
    }
}
