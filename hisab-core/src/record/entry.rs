use super::parsed_record::{EntryKey, ParsedRecord};
use super::shift::Shift;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A record as held by a record store, identified only by its `(date, shift)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub shift: Shift,
    pub amount: f64,
    /// Milliseconds since the Unix epoch, stamped by the store on write.
    pub timestamp: i64,
}

impl Entry {
    pub fn from_record(record: &ParsedRecord, timestamp: i64) -> Self {
        Self {
            date: record.date,
            shift: record.shift,
            amount: record.amount,
            timestamp,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.date, self.shift)
    }

    pub fn record(&self) -> ParsedRecord {
        ParsedRecord {
            date: self.date,
            shift: self.shift,
            amount: self.amount,
        }
    }

    /// Write time in the local timezone, if the timestamp is representable.
    pub fn written_at(&self) -> Option<DateTime<Local>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp).map(|t| t.with_timezone(&Local))
    }
}
