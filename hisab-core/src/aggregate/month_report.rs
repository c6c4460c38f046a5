use super::month_period::MonthPeriod;
use crate::record::Entry;
use std::cmp::Reverse;

/// Entries of one month in table order, with their total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthReport {
    pub period: MonthPeriod,
    pub entries: Vec<Entry>,
    pub total: f64,
}

impl MonthReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the report of `period` out of a full store snapshot.
///
/// Keeps entries dated within `[period.start(), period.end()]`, sorted by date
/// then shift (morning first), and sums their amounts.
pub fn month_report(entries: &[Entry], period: MonthPeriod) -> MonthReport {
    let mut entries: Vec<Entry> = entries
        .iter()
        .filter(|e| period.contains(e.date))
        .cloned()
        .collect();
    entries.sort_by_key(|e| (e.date, e.shift));
    let total = entries.iter().map(|e| e.amount).sum();

    MonthReport {
        period,
        entries,
        total,
    }
}

/// All entries, latest first. Within a day the evening comes before the morning.
pub fn recent_first(entries: &[Entry]) -> Vec<Entry> {
    let mut entries = entries.to_vec();
    entries.sort_by_key(|e| Reverse((e.date, e.shift)));
    entries
}
