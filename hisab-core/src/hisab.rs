use crate::{
    Config,
    aggregate::{InvalidMonth, MonthPeriod, MonthReport, month_report, recent_first},
    capture::CaptureSession,
    keywords::Keyword,
    record::{Entry, MissingFields, ParsedRecord},
    store::{FileStore, RecordStore, SaveOutcome, save_record},
    utterance::{ParseOptions, parse_utterance},
};
use anyhow::Result;
use std::sync::mpsc::Receiver;

pub struct Hisab {
    pub config: Config,
    store: Box<dyn RecordStore>,
}

impl Hisab {
    /// Creates a new `Hisab` instance, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Hisab` instance with a specific `Config`, backed by a
    /// [`FileStore`] at `config.store_dir`.
    ///
    /// This also ensures that the store directory exists.
    pub fn with_config(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.store_dir)?;
        Ok(Self::with_store(config, Box::new(store)))
    }

    pub fn with_store(config: Config, store: Box<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Parses one transcript against today's date and the configured keywords.
    pub fn parse_transcript(&self, text: &str) -> Result<ParsedRecord, MissingFields> {
        let opts = ParseOptions {
            reference_date: Some(self.config.today()),
            keywords: Some(&self.config.keywords),
        };
        parse_utterance(text, Some(opts))
    }

    pub fn parse_form(
        &self,
        date: &str,
        shift: &str,
        amount: &str,
    ) -> Result<ParsedRecord, MissingFields> {
        ParsedRecord::from_form(date, shift, amount)
    }

    /// Saves `record`. See [`save_record`] for the overwrite protocol.
    pub fn save_record<F>(&self, record: &ParsedRecord, confirm_overwrite: F) -> Result<SaveOutcome>
    where
        F: FnOnce(&Entry) -> bool,
    {
        save_record(self.store(), record, confirm_overwrite)
    }

    /// Resolves a month argument. `None` means the current month.
    pub fn resolve_month(&self, input: Option<&str>) -> Result<MonthPeriod, InvalidMonth> {
        let input = input.unwrap_or(Keyword::ThisMonth.as_ref());
        MonthPeriod::resolve(input, self.config.today(), &self.config.keywords)
    }

    pub fn month_report(&self, period: MonthPeriod) -> Result<MonthReport> {
        Ok(month_report(&self.store.snapshot()?, period))
    }

    /// Every stored entry, latest first.
    pub fn recent_entries(&self) -> Result<Vec<Entry>> {
        Ok(recent_first(&self.store.snapshot()?))
    }

    pub fn subscribe(&self) -> Result<Receiver<Vec<Entry>>> {
        self.store.subscribe()
    }

    /// A fresh capture state machine using the configured timeout.
    pub fn capture_session(&self) -> CaptureSession {
        CaptureSession::new(self.config.capture_timeout)
    }
}
