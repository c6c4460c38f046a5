use super::missing_fields::MissingFields;
use super::shift::Shift;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A complete `{date, shift, amount}` triple, ready to be confirmed and saved.
///
/// Only ever built when every field resolved and `amount > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub date: NaiveDate,
    pub shift: Shift,
    pub amount: f64,
}

impl ParsedRecord {
    /// Assembles a record, reporting every unresolved field in order.
    pub fn assemble(
        date: Option<NaiveDate>,
        shift: Option<Shift>,
        amount: Option<f64>,
    ) -> Result<Self, MissingFields> {
        let amount = amount.filter(|a| is_positive_amount(*a));
        match (date, shift, amount) {
            (Some(date), Some(shift), Some(amount)) => Ok(Self {
                date,
                shift,
                amount,
            }),
            (date, shift, amount) => Err(MissingFields::collect(
                date.is_some(),
                shift.is_some(),
                amount.is_some(),
            )),
        }
    }

    /// Validates the three inputs of the manual entry form.
    ///
    /// * `date` - ISO `YYYY-MM-DD`.
    /// * `shift` - `morning`/`evening`, `subah`/`shaam` or the Devanagari spelling.
    /// * `amount` - a positive decimal, `.` or `,` as separator.
    pub fn from_form(date: &str, shift: &str, amount: &str) -> Result<Self, MissingFields> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok();
        let shift = Shift::from_form_value(shift);
        let amount = amount.trim().replace(',', ".").parse::<f64>().ok();
        Self::assemble(date, shift, amount)
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.date, self.shift)
    }
}

pub(crate) fn is_positive_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Store key of an entry: `${date}_${shift}`, e.g. `2025-05-26_evening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub date: NaiveDate,
    pub shift: Shift,
}

impl EntryKey {
    pub fn new(date: NaiveDate, shift: Shift) -> Self {
        Self { date, shift }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.date.format("%Y-%m-%d"), self.shift)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entry key '{0}'")]
pub struct InvalidEntryKey(pub String);

impl FromStr for EntryKey {
    type Err = InvalidEntryKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidEntryKey(s.to_string());
        let (date, shift) = s.split_once('_').ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
        let shift = shift.parse::<Shift>().map_err(|_| invalid())?;
        Ok(Self { date, shift })
    }
}

impl Serialize for EntryKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
