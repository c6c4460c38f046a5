use std::error::Error;
use std::fmt;

/// A record field that could not be resolved from the input.
///
/// Declared in reporting order: date, shift, amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MissingField {
    Date,
    Shift,
    Amount,
}

impl MissingField {
    /// Human-readable hint shown when asking the user to try again.
    pub fn descriptor(&self) -> &'static str {
        match self {
            MissingField::Date => r#"Date (e.g., "26 may" ya "aaj")"#,
            MissingField::Shift => "Shift (subah/shaam)",
            MissingField::Amount => r#"Amount (e.g., "126 point 56 ka doodh")"#,
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor())
    }
}

/// Which fields an incomplete parse or form could not resolve.
///
/// Never empty, always sorted date, shift, amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    fields: Vec<MissingField>,
}

impl MissingFields {
    /// Builds the report from the resolution state of each field.
    /// Returns `None` when nothing is missing.
    pub fn from_flags(date: bool, shift: bool, amount: bool) -> Option<Self> {
        let missing = Self::collect(date, shift, amount);
        if missing.fields.is_empty() {
            None
        } else {
            Some(missing)
        }
    }

    /// Callers must have checked that at least one flag is `false`.
    pub(crate) fn collect(date: bool, shift: bool, amount: bool) -> Self {
        let mut fields = Vec::new();
        if !date {
            fields.push(MissingField::Date);
        }
        if !shift {
            fields.push(MissingField::Shift);
        }
        if !amount {
            fields.push(MissingField::Amount);
        }
        Self { fields }
    }

    pub fn fields(&self) -> &[MissingField] {
        &self.fields
    }

    pub fn contains(&self, field: MissingField) -> bool {
        self.fields.contains(&field)
    }

    pub fn descriptors(&self) -> Vec<&'static str> {
        self.fields.iter().map(MissingField::descriptor).collect()
    }
}

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptors().join(", "))
    }
}

impl Error for MissingFields {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_missing_is_none() {
        assert!(MissingFields::from_flags(true, true, true).is_none());
    }

    #[test]
    fn keeps_reporting_order() {
        let missing = MissingFields::from_flags(false, true, false).unwrap();
        assert_eq!(missing.fields(), &[MissingField::Date, MissingField::Amount]);
        assert!(!missing.contains(MissingField::Shift));
    }

    #[test]
    fn message_joins_descriptors() {
        let missing = MissingFields::from_flags(true, false, false).unwrap();
        assert_eq!(
            missing.to_string(),
            r#"Shift (subah/shaam), Amount (e.g., "126 point 56 ka doodh")"#
        );
    }
}
