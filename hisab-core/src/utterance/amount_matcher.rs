use super::numbers::{NUMBER_PATTERN, parse_number};
use crate::record::is_positive_amount;
use once_cell::sync::Lazy;
use regex::Regex;

/// A number directly followed by a unit or possessive marker (`150 ka`, `2.5 litre`, `80 doodh`).
static AMOUNT: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"({NUMBER_PATTERN})\s*(?:ka|का|litre|liter|kg|doodh|दूध)");
    Regex::new(&pattern).expect("amount pattern is valid")
});

/// Finds the delivered amount in a normalized utterance.
///
/// `None` when no number precedes a marker, or when the number is not a
/// positive finite quantity.
pub fn match_amount(text: &str) -> Option<f64> {
    let caps = AMOUNT.captures(text)?;
    parse_number(caps.get(1)?.as_str()).filter(|amount| is_positive_amount(*amount))
}
