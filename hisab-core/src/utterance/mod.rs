//! Utterance parser: free Hinglish text → `{date, shift, amount}`.

mod amount_matcher;
mod date_matcher;
mod numbers;
mod parse_utterance;
mod shift_matcher;

pub use amount_matcher::match_amount;
pub use date_matcher::{match_date, month_from_name};
pub use parse_utterance::{ParseOptions, parse_utterance};
pub use shift_matcher::match_shift;
