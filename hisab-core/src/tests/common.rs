use crate::Config;
use crate::capture::DEFAULT_CAPTURE_TIMEOUT;
use crate::config::{DEFAULT_CURRENCY, DEFAULT_DATE_FORMAT};
use crate::keywords::Keywords;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(tmp_dir: PathBuf, reference_date: Option<NaiveDate>) -> Config {
    Config {
        store_dir: tmp_dir,
        editor: None,
        capture_timeout: DEFAULT_CAPTURE_TIMEOUT,
        date_format: DEFAULT_DATE_FORMAT.to_string(),
        currency: DEFAULT_CURRENCY.to_string(),
        reference_date,
        keywords: Keywords::default(),
    }
}
