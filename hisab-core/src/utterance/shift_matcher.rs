use crate::keywords::{Keyword, Keywords};
use crate::record::Shift;

const SHIFT_KEYWORDS: &[Keyword] = &[Keyword::Subah, Keyword::Shaam, Keyword::Dupahar];

/// Finds the first shift word in a normalized utterance.
///
/// `dupahar` (afternoon) has no shift of its own and is booked as morning.
pub fn match_shift(text: &str, keywords: &Keywords) -> Option<Shift> {
    let (_, keyword) = keywords.find_first(text, SHIFT_KEYWORDS)?;
    match keyword {
        Keyword::Shaam => Some(Shift::Evening),
        Keyword::Subah | Keyword::Dupahar => Some(Shift::Morning),
        _ => None,
    }
}
