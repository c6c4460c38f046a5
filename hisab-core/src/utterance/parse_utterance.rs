use super::amount_matcher::match_amount;
use super::date_matcher::match_date;
use super::shift_matcher::match_shift;
use crate::keywords::Keywords;
use crate::record::{MissingFields, ParsedRecord, Shift};
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Configuration options for [`parse_utterance`].
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions<'a> {
    /// The date to use as "today" for `aaj`/`kal`, and as the source of the
    /// year and default month for explicit days.
    pub reference_date: Option<NaiveDate>,
    /// Keyword registry, e.g. one extended with user synonyms.
    pub keywords: Option<&'a Keywords>,
}

/// Extracts a `{date, shift, amount}` record from one transcript.
///
/// The transcript is lower-cased and trimmed, then three independent matchers
/// run over it (see [`match_date`], [`match_shift`], [`match_amount`]). When no
/// shift word is present and the date is the reference date, the shift defaults
/// to morning.
///
/// # Returns
///
/// The complete [`ParsedRecord`], or [`MissingFields`] naming every field that
/// could not be resolved, in the order date, shift, amount.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use hisab_core::record::Shift;
/// # use hisab_core::utterance::{parse_utterance, ParseOptions};
/// let opts = ParseOptions {
///     reference_date: Some(NaiveDate::from_ymd_opt(2025, 8, 17).unwrap()),
///     ..Default::default()
/// };
///
/// let record = parse_utterance("26 May ki shaam ko 126 point 56 ka doodh", Some(opts)).unwrap();
///
/// assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 5, 26).unwrap());
/// assert_eq!(record.shift, Shift::Evening);
/// assert_eq!(record.amount, 126.56);
/// ```
pub fn parse_utterance(
    text: &str,
    options: Option<ParseOptions>,
) -> Result<ParsedRecord, MissingFields> {
    let options = options.unwrap_or_default();
    let reference_date = options
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());
    let keywords = options.keywords.unwrap_or_else(|| Keywords::builtin());

    let normalized = text.trim().to_lowercase();

    let date = match_date(&normalized, reference_date, keywords);
    let shift = match_shift(&normalized, keywords).or_else(|| {
        if date == Some(reference_date) {
            Some(Shift::Morning)
        } else {
            None
        }
    });
    let amount = match_amount(&normalized);

    debug!(transcript = %normalized, ?date, ?shift, ?amount, "parsed utterance");

    ParsedRecord::assemble(date, shift, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MissingField;
    use chrono::{Datelike, Duration};

    fn opts(anchor: NaiveDate) -> Option<ParseOptions<'static>> {
        Some(ParseOptions {
            reference_date: Some(anchor),
            ..Default::default()
        })
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn explicit_day_month_evening() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("26 may ki shaam ko 126.56 ka doodh", opts(anchor)).unwrap();
        assert_eq!(r.date, d(2025, 5, 26));
        assert_eq!(r.shift, Shift::Evening);
        assert_eq!(r.amount, 126.56);
        assert_eq!(r.key().to_string(), "2025-05-26_evening");
    }

    #[test]
    fn aaj_subah() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("aaj subah ko 150 ka doodh", opts(anchor)).unwrap();
        assert_eq!(r.date, anchor);
        assert_eq!(r.shift, Shift::Morning);
        assert_eq!(r.amount, 150.0);
    }

    #[test]
    fn fragments_in_any_order() {
        let anchor = d(2025, 8, 15);
        let a = parse_utterance("aaj subah ko 150 ka doodh", opts(anchor)).unwrap();
        let b = parse_utterance("150 ka doodh aaj subah ko", opts(anchor)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn today_without_shift_defaults_to_morning() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("aaj 150 ka doodh", opts(anchor)).unwrap();
        assert_eq!(r.date, anchor);
        assert_eq!(r.shift, Shift::Morning);
    }

    #[test]
    fn explicit_today_without_shift_defaults_to_morning() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("15 aug ko 60 ka doodh", opts(anchor)).unwrap();
        assert_eq!(r.shift, Shift::Morning);
    }

    #[test]
    fn tomorrow_without_shift_is_missing_shift() {
        let anchor = d(2025, 8, 15);
        let missing = parse_utterance("kal 150 ka doodh", opts(anchor)).unwrap_err();
        assert_eq!(missing.fields(), &[MissingField::Shift]);
    }

    #[test]
    fn kal_shaam_is_next_evening() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("Kal shaam 2 litre", opts(anchor)).unwrap();
        assert_eq!(r.date, anchor + Duration::days(1));
        assert_eq!(r.shift, Shift::Evening);
        assert_eq!(r.amount, 2.0);
    }

    #[test]
    fn day_only_defaults_month_and_misses_shift() {
        let anchor = d(2025, 8, 15);
        let missing = parse_utterance("26 ki 100 ka doodh", opts(anchor)).unwrap_err();
        assert_eq!(missing.fields(), &[MissingField::Shift]);

        let r = parse_utterance("26 ki shaam 100 ka doodh", opts(anchor)).unwrap();
        assert_eq!(r.date, d(anchor.year(), anchor.month(), 26));
        assert_eq!(r.amount, 100.0);
    }

    #[test]
    fn random_text_misses_everything_in_order() {
        let missing = parse_utterance("kuch bhi random", opts(d(2025, 8, 15))).unwrap_err();
        assert_eq!(
            missing.fields(),
            &[MissingField::Date, MissingField::Shift, MissingField::Amount]
        );
    }

    #[test]
    fn devanagari_utterance() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("आज शाम को 45 का दूध", opts(anchor)).unwrap();
        assert_eq!(r.date, anchor);
        assert_eq!(r.shift, Shift::Evening);
        assert_eq!(r.amount, 45.0);
    }

    #[test]
    fn mixed_case_and_padding_are_normalized() {
        let anchor = d(2025, 8, 15);
        let r = parse_utterance("   AAJ Shaam Ko 126 Point 56 Ka Doodh  ", opts(anchor)).unwrap();
        assert_eq!(r.shift, Shift::Evening);
        assert_eq!(r.amount, 126.56);
    }

    #[test]
    fn same_input_same_result() {
        let anchor = d(2025, 8, 15);
        let input = "26 may ki shaam ko 126 point 56 ka doodh";
        assert_eq!(
            parse_utterance(input, opts(anchor)),
            parse_utterance(input, opts(anchor))
        );
        let random = "kuch bhi random";
        assert_eq!(
            parse_utterance(random, opts(anchor)),
            parse_utterance(random, opts(anchor))
        );
    }

    #[test]
    fn relative_dates_follow_reference_date() {
        for anchor in [d(2024, 2, 28), d(2025, 12, 31), d(2026, 10, 18)] {
            let today = parse_utterance("aaj shaam 10 ka", opts(anchor)).unwrap();
            assert_eq!(today.date, anchor);
            let tomorrow = parse_utterance("kal shaam 10 ka", opts(anchor)).unwrap();
            assert_eq!(tomorrow.date, anchor + Duration::days(1));
        }
    }

    #[test]
    fn without_reference_date_uses_today() {
        let r = parse_utterance("aaj subah 10 ka", None).unwrap();
        assert_eq!(r.date, Local::now().date_naive());
    }

    #[test]
    fn missing_amount_only() {
        let missing = parse_utterance("aaj subah ko doodh", opts(d(2025, 8, 15))).unwrap_err();
        assert_eq!(missing.fields(), &[MissingField::Amount]);
    }

    #[test]
    fn custom_keywords_are_used() {
        let mut keywords = Keywords::default();
        keywords.extend(&[("aj".into(), "aaj".into()), ("sham".into(), "shaam".into())]);
        let options = ParseOptions {
            reference_date: Some(d(2025, 8, 15)),
            keywords: Some(&keywords),
        };
        let r = parse_utterance("aj sham 70 ka", Some(options)).unwrap();
        assert_eq!(r.date, d(2025, 8, 15));
        assert_eq!(r.shift, Shift::Evening);
    }
}
