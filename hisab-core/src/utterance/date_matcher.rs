use super::numbers::NUMBER;
use crate::keywords::{Keyword, Keywords};
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Month names as they get transcribed, full forms first so `june` is not read as `jun`.
const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// What may follow a day number: an optional month name and the possessive `ki`/`को`.
static DAY_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = MONTHS.iter().map(|(name, _)| *name).collect();
    let pattern = format!(r"^\s*(?:({})\b)?\s*(?:ki|को)?", names.join("|"));
    Regex::new(&pattern).expect("day suffix pattern is valid")
});

/// Resolves the date of a normalized utterance.
///
/// Resolution order, first match wins:
/// 1. `aaj` (or any alias of [`Keyword::Aaj`]) → `reference_date`.
/// 2. `kal` (or alias) → the day after `reference_date`.
/// 3. The first one- or two-digit number (decimals don't count), optionally
///    followed by a month name. Without a month the reference month is used; the
///    year is always the reference year.
///
/// A day outside 1–31, or a day the month doesn't have, leaves the date unresolved.
pub fn match_date(text: &str, reference_date: NaiveDate, keywords: &Keywords) -> Option<NaiveDate> {
    if keywords.contains(Keyword::Aaj, text) {
        return Some(reference_date);
    }
    if keywords.contains(Keyword::Kal, text) {
        return Some(reference_date + Duration::days(1));
    }

    let day_token = NUMBER
        .find_iter(text)
        .find(|m| m.as_str().len() <= 2 && m.as_str().bytes().all(|b| b.is_ascii_digit()))?;
    let day: u32 = day_token.as_str().parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }

    let month = DAY_SUFFIX
        .captures(&text[day_token.end()..])
        .and_then(|caps| caps.get(1))
        .and_then(|name| month_from_name(name.as_str()))
        .unwrap_or_else(|| reference_date.month());

    NaiveDate::from_ymd_opt(reference_date.year(), month, day)
}

/// Looks a month up in the name table (`"may"` → 5, `"sep"`/`"september"` → 9).
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, number)| *number)
}
