use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf, time::Duration};
use tracing::warn;

use crate::capture::DEFAULT_CAPTURE_TIMEOUT;
use crate::keywords::Keywords;

pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";
pub const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the file store (`YYYY/MM.toml` month files live below it).
    pub store_dir: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// A capture session ends after this long without any result.
    pub capture_timeout: Duration,
    /// Display format for dates in previews and reports.
    pub date_format: String,
    pub currency: String,
    /// Pins "aaj", "this month" etc. to a fixed date. `None` follows the clock.
    pub reference_date: Option<NaiveDate>,
    /// Built-in aliases extended with the user's `[synonyms]`.
    pub keywords: Keywords,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    store_dir: Option<PathBuf>,
    editor: Option<String>,
    capture_timeout_secs: Option<u64>,
    date_format: Option<String>,
    currency: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// subha = "subah"
    /// sham = "shaam"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    /// A missing or broken file yields the defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let capture_timeout = match file_config.capture_timeout_secs {
            Some(0) => {
                warn!("capture_timeout_secs must be positive, using default");
                DEFAULT_CAPTURE_TIMEOUT
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_CAPTURE_TIMEOUT,
        };

        let mut keywords = Keywords::default();
        Self::load_synonyms(&mut keywords, &file_config.synonyms);

        Self {
            store_dir: file_config.store_dir.unwrap_or_else(Self::default_store_dir),
            editor: file_config.editor,
            capture_timeout,
            date_format: match file_config.date_format {
                Some(format) if is_valid_date_format(&format) => format,
                Some(format) => {
                    warn!(date_format = format.as_str(), "not a valid strftime format, using default");
                    DEFAULT_DATE_FORMAT.to_string()
                }
                None => DEFAULT_DATE_FORMAT.to_string(),
            },
            currency: file_config
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            reference_date: None,
            keywords,
        }
    }

    /// The date relative keywords resolve against, read from the clock on each call
    /// unless pinned by `reference_date`.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Default store root: `{data_dir}/hisab`
    /// - macOS:   `~/Library/Application Support/hisab`
    /// - Linux:   `$XDG_DATA_HOME/hisab` or `~/.local/share/hisab`
    /// - Windows: `%APPDATA%\hisab`
    fn default_store_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("hisab")
        } else {
            PathBuf::from("./hisab")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(b.home_dir().join(".config").join("hisab").join("config.toml"));
            v.push(b.config_dir().join("hisab").join("config.toml"));
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into `keywords`.
    /// Omits synonyms that collide with a built-in alias (eg. "aaj", "morning").
    fn load_synonyms(keywords: &mut Keywords, synonyms: &Option<HashMap<String, String>>) {
        let Some(map) = synonyms else {
            return;
        };
        let pairs: Vec<(String, String)> = map
            .iter()
            .filter(|(alias, _)| {
                let builtin = Keywords::is_builtin(alias);
                if builtin {
                    warn!(alias = alias.as_str(), "synonym shadows a built-in keyword, skipped");
                }
                !builtin
            })
            .map(|(a, t)| (a.clone(), t.clone()))
            .collect();

        if !pairs.is_empty() {
            keywords.extend(&pairs);
        }
    }
}

fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::Keyword;
    use std::path::Path;

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("hisab").join("config.toml");
            let expected_native = b.config_dir().join("hisab").join("config.toml");
            let c = Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_all_keys() {
        let toml = r#"
            store_dir = "/tmp/doodh"
            editor = "hx"
            capture_timeout_secs = 8
            date_format = "%d/%m/%Y"
            currency = "Rs."
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(config.store_dir, Path::new("/tmp/doodh"));
        assert_eq!(config.editor.as_deref(), Some("hx"));
        assert_eq!(config.capture_timeout, Duration::from_secs(8));
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.currency, "Rs.");
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert_eq!(config.capture_timeout, DEFAULT_CAPTURE_TIMEOUT);
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.currency, DEFAULT_CURRENCY);
        assert!(config.store_dir.ends_with("hisab"));
        assert!(config.editor.is_none());
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config =
            Config::from_file_config(Config::parse_file("capture_timeout_secs = 0").unwrap());
        assert_eq!(config.capture_timeout, DEFAULT_CAPTURE_TIMEOUT);
    }

    #[test]
    fn invalid_date_format_falls_back_to_default() {
        let config = Config::from_file_config(Config::parse_file(r#"date_format = "%Q""#).unwrap());
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);

        let config = Config::from_file_config(Config::parse_file(r#"date_format = "%e %B""#).unwrap());
        assert_eq!(config.date_format, "%e %B");

        let day = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        assert_eq!(day.format(DEFAULT_DATE_FORMAT).to_string(), "26 May 2025");
    }

    #[test]
    fn today_follows_the_clock_unless_pinned() {
        let mut config = Config::from_file_config(FileConfig::default());
        assert!(config.reference_date.is_none());
        let before = Local::now().date_naive();
        let today = config.today();
        assert!(today == before || today == Local::now().date_naive());

        let pinned = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        config.reference_date = Some(pinned);
        assert_eq!(config.today(), pinned);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::parse_file("store_dir = [").is_err());
        assert!(Config::parse_file("capture_timeout_secs = \"five\"").is_err());
    }

    #[test]
    fn synonyms_extend_keywords() {
        let toml = r#"
            [synonyms]
            subha = "subah"
            SHAM = "shaam"
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert!(config.keywords.matches(Keyword::Subah, "subha"));
        assert!(config.keywords.matches(Keyword::Shaam, "sham"));
        assert!(!Keywords::builtin().matches(Keyword::Subah, "subha"));
    }

    #[test]
    fn builtin_synonyms_are_dropped() {
        let toml = r#"
            [synonyms]
            aaj = "kal"
            morning = "shaam"
            "आज" = "kal"
            parso = "kal"
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert!(!config.keywords.matches(Keyword::Kal, "aaj"));
        assert!(config.keywords.matches(Keyword::Aaj, "aaj"));
        assert!(config.keywords.matches(Keyword::Subah, "morning"));
        assert!(config.keywords.matches(Keyword::Aaj, "आज"));
        assert!(config.keywords.matches(Keyword::Kal, "parso"));
    }
}
