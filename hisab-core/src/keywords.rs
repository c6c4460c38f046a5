use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    /// Today.
    Aaj,
    /// Tomorrow.
    Kal,
    Subah,
    Shaam,
    /// Afternoon, booked as a morning delivery.
    Dupahar,
    #[strum(serialize = "this month")]
    ThisMonth,
    #[strum(serialize = "last month")]
    LastMonth,
}

/// Registry of spoken aliases (input → canonical keyword).
///
/// Lookups are case-insensitive: every alias is stored lower-cased. Devanagari
/// aliases are stored as-is since the script has no case.
///
/// The registry is a plain value. Extend a copy with user synonyms (see
/// [`Config`](crate::Config)) and hand it to the parser through its options.
#[derive(Debug, Clone)]
pub struct Keywords {
    aliases: HashMap<String, Keyword>,
}

static DEFAULT_KEYWORDS: Lazy<Keywords> = Lazy::new(Keywords::default);

impl Default for Keywords {
    fn default() -> Self {
        let mut m = HashMap::new();
        m.insert("aaj".to_string(), Keyword::Aaj);
        m.insert("आज".to_string(), Keyword::Aaj);
        m.insert("kal".to_string(), Keyword::Kal);
        m.insert("कल".to_string(), Keyword::Kal);
        m.insert("subah".to_string(), Keyword::Subah);
        m.insert("सुबह".to_string(), Keyword::Subah);
        m.insert("morning".to_string(), Keyword::Subah);
        m.insert("shaam".to_string(), Keyword::Shaam);
        m.insert("शाम".to_string(), Keyword::Shaam);
        m.insert("evening".to_string(), Keyword::Shaam);
        m.insert("dupahar".to_string(), Keyword::Dupahar);
        m.insert("this month".to_string(), Keyword::ThisMonth);
        m.insert("is mahine".to_string(), Keyword::ThisMonth);
        m.insert("last month".to_string(), Keyword::LastMonth);
        m.insert("pichhle mahine".to_string(), Keyword::LastMonth);

        Self { aliases: m }
    }
}

impl Keywords {
    /// Shared registry with only the built-in aliases.
    pub fn builtin() -> &'static Keywords {
        &DEFAULT_KEYWORDS
    }

    /// Extends the registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must already be a known alias
    /// (a canonical word or an earlier synonym); unknown targets are ignored silently.
    /// Built-in aliases ("aaj", "morning", "आज", ...) are never re-targeted.
    ///
    /// ```
    /// # use hisab_core::keywords::{Keyword, Keywords};
    /// let mut keywords = Keywords::default();
    /// keywords.extend(&[("subha".into(), "subah".into()), ("sham".into(), "shaam".into())]);
    ///
    /// assert!(keywords.matches(Keyword::Subah, "Subha"));
    /// assert!(keywords.matches(Keyword::Shaam, "sham"));
    /// ```
    pub fn extend(&mut self, synonyms: &[(String, String)]) {
        for (alias, target) in synonyms {
            let alias = alias.trim().to_lowercase();
            if alias.is_empty() || Self::is_builtin(&alias) {
                continue;
            }
            if let Some(&canonical) = self.aliases.get(&target.trim().to_lowercase()) {
                self.aliases.insert(alias, canonical);
            }
        }
    }

    /// Returns `true` if `word` is one of the built-in aliases, canonical words included.
    pub fn is_builtin(word: &str) -> bool {
        Self::builtin()
            .aliases
            .contains_key(&word.trim().to_lowercase())
    }

    /// Returns `true` if `input` equals (case-insensitively) one of the aliases of `keyword`.
    pub fn matches(&self, keyword: Keyword, input: &str) -> bool {
        self.aliases
            .get(&input.trim().to_lowercase())
            .map(|&canon| canon == keyword)
            .unwrap_or(false)
    }

    /// Returns `true` if any alias of `keyword` occurs anywhere in `text`.
    ///
    /// `text` is expected to be lower-cased already.
    pub fn contains(&self, keyword: Keyword, text: &str) -> bool {
        self.aliases_of(keyword).any(|alias| text.contains(alias))
    }

    /// Finds the earliest occurrence in `text` of an alias of any of `keywords`.
    ///
    /// Returns the byte position and the keyword it belongs to. On a tie the
    /// longest alias wins.
    pub fn find_first(&self, text: &str, keywords: &[Keyword]) -> Option<(usize, Keyword)> {
        self.aliases
            .iter()
            .filter(|(_, keyword)| keywords.contains(keyword))
            .filter_map(|(alias, &keyword)| {
                text.find(alias.as_str())
                    .map(|pos| (pos, alias.len(), keyword))
            })
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
            .map(|(pos, _, keyword)| (pos, keyword))
    }

    fn aliases_of(&self, keyword: Keyword) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .filter(move |(_, k)| **k == keyword)
            .map(|(alias, _)| alias.as_str())
    }
}
