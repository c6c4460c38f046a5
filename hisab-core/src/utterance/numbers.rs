use once_cell::sync::Lazy;
use regex::Regex;

/// A spoken or written number: `150`, `126.56`, `126,56`, `126 point 56`, `126 bindu 56`.
/// ASCII digits only; `\d` would also take Devanagari digits that `f64` cannot parse.
pub(super) const NUMBER_PATTERN: &str = r"[0-9]+(?:\s*(?:point|bindu)\s*[0-9]+|[.,][0-9]+)?";

pub(super) static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"));

static SPOKEN_POINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?:point|bindu)\s*").expect("spoken point pattern is valid"));

/// Turns a token matched by [`NUMBER_PATTERN`] into a float.
///
/// The spoken separator and `,` both become `.`. Returns `None` for anything
/// that still does not parse.
pub(super) fn parse_number(token: &str) -> Option<f64> {
    let normalized = SPOKEN_POINT.replace_all(token.trim(), ".").replace(',', ".");
    normalized.parse::<f64>().ok()
}
