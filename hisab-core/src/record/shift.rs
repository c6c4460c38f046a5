use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the two daily delivery windows.
///
/// Ordered so that `Morning` sorts before `Evening` on the same day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Shift {
    Morning,
    Evening,
}

impl Shift {
    /// Hinglish label used when showing a shift to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Subah",
            Shift::Evening => "Shaam",
        }
    }

    /// Parses a shift typed into a form: the stored names, the Hinglish labels
    /// or their Devanagari spelling.
    pub fn from_form_value(value: &str) -> Option<Shift> {
        let value = value.trim().to_lowercase();
        match value.as_str() {
            "subah" | "सुबह" => Some(Shift::Morning),
            "shaam" | "शाम" => Some(Shift::Evening),
            other => other.parse().ok(),
        }
    }
}
