use crate::{
    BaseCli, RenderOptions,
    common::{CliModeResult, create_editor_buffer, is_quit, is_yes, read_stdin_line, resolve_editor},
    render::Renderer,
};
use anyhow::Result;
use hisab_core::{
    Hisab,
    aggregate::recent_first,
    capture::{CaptureError, CaptureOutcome, CaptureSession},
    record::{Entry, ParsedRecord},
};
use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};
use tracing::debug;

const LISTEN_HINT: &str =
    "Bolo/likho, e.g. \"26 may ki shaam ko 126 point 56 ka doodh\". Khaali line = kuch nahi bola, q = band.";
/// How often the capture loop checks the inactivity timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(200);
/// Entries shown after each save in listen mode.
const RECENT_LIMIT: usize = 5;

enum Listened {
    Quit,
    Ended {
        outcome: CaptureOutcome,
        timed_out: bool,
    },
}

pub struct HisabCli {
    cli: BaseCli,
    renderer: Renderer,
    hisab: Hisab,
}

impl HisabCli {
    pub fn new(cli: BaseCli, hisab: Hisab) -> Self {
        let renderer = Renderer::new(Some(RenderOptions {
            date_format: hisab.config.date_format.to_string(),
            currency: hisab.config.currency.to_string(),
            use_color: cli.use_color(),
        }));
        HisabCli {
            cli,
            renderer,
            hisab,
        }
    }

    pub fn run(&self) -> Result<()> {
        if self.cli.path {
            self.renderer
                .print_info(&format!("{}", self.hisab.config.store_dir.display()));
            return Ok(());
        }

        if let CliModeResult::Finish = self.manual_mode()? {
            return Ok(());
        };

        if let CliModeResult::Finish = self.write_mode()? {
            return Ok(());
        };

        if let CliModeResult::Finish = self.listen_mode()? {
            return Ok(());
        };

        if let CliModeResult::Finish = self.month_mode()? {
            return Ok(());
        };

        if let CliModeResult::Finish = self.entries_mode()? {
            return Ok(());
        };

        if let CliModeResult::Finish = self.editor_mode()? {
            return Ok(());
        };

        Ok(())
    }

    /// `--date/--shift/--amount`: the manual form.
    pub fn manual_mode(&self) -> Result<CliModeResult> {
        if !self.cli.has_form() {
            return Ok(CliModeResult::NothingToDo);
        }
        let parsed = self.hisab.parse_form(
            self.cli.date.as_deref().unwrap_or_default(),
            self.cli.shift.as_deref().unwrap_or_default(),
            self.cli.amount.as_deref().unwrap_or_default(),
        );
        match parsed {
            Ok(record) => self.save(&record, &mut read_stdin_line)?,
            Err(missing) => self.renderer.print_missing(&missing),
        }
        Ok(CliModeResult::Finish)
    }

    /// Free text on the command line.
    pub fn write_mode(&self) -> Result<CliModeResult> {
        if self.cli.text.is_empty() {
            return Ok(CliModeResult::NothingToDo);
        }
        let inline = self.cli.text.join(" ");
        self.handle_transcript(&inline, &mut read_stdin_line)?;
        Ok(CliModeResult::Finish)
    }

    /// No arguments: type the utterance in `$EDITOR`.
    pub fn editor_mode(&self) -> Result<CliModeResult> {
        let editor = resolve_editor(&self.hisab.config.editor);
        let input = create_editor_buffer(&editor)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.renderer
                .print_info("Kuch likha nahi, isliye kuch save nahi hua.");
            return Ok(CliModeResult::Finish);
        }
        self.handle_transcript(trimmed, &mut read_stdin_line)?;
        Ok(CliModeResult::Finish)
    }

    pub fn month_mode(&self) -> Result<CliModeResult> {
        let Some(month) = &self.cli.month else {
            return Ok(CliModeResult::NothingToDo);
        };
        let period = self.hisab.resolve_month(Some(month.as_str()))?;
        let report = self.hisab.month_report(period)?;
        self.renderer.print_month_report(&report);
        Ok(CliModeResult::Finish)
    }

    pub fn entries_mode(&self) -> Result<CliModeResult> {
        if !self.cli.entries {
            return Ok(CliModeResult::NothingToDo);
        }
        let entries = self.hisab.recent_entries()?;
        self.renderer.print_entries(&entries);
        Ok(CliModeResult::Finish)
    }

    /// Interactive capture. Every typed line is the final transcript of one
    /// capture session; saved entries are re-rendered from the store
    /// subscription.
    pub fn listen_mode(&self) -> Result<CliModeResult> {
        if !self.cli.listen {
            return Ok(CliModeResult::NothingToDo);
        }

        let updates = self.hisab.subscribe()?;
        if let Ok(snapshot) = updates.recv() {
            self.print_recent(&snapshot);
        }

        let lines = spawn_line_reader();
        let mut capture = self.hisab.capture_session();
        let mut answers = || -> Result<Option<String>> { Ok(lines.recv().ok()) };
        let mut pending: Option<String> = None;

        self.renderer.print_info(LISTEN_HINT);
        loop {
            let first = pending.take();
            let (outcome, timed_out) = match listen_once(&mut capture, &lines, first) {
                Listened::Quit => return Ok(CliModeResult::Finish),
                Listened::Ended { outcome, timed_out } => (outcome, timed_out),
            };

            match outcome {
                CaptureOutcome::Transcript { text, .. } => {
                    self.listen_transcript(&text, &mut answers);
                    if let Some(snapshot) = updates.try_iter().last() {
                        self.print_recent(&snapshot);
                    }
                }
                CaptureOutcome::NoSpeech { .. } => {
                    self.renderer.print_error(&CaptureError::NoSpeech.to_string());
                }
                CaptureOutcome::Failed { error, .. } => {
                    self.renderer.print_error(&error.to_string());
                }
            }

            if timed_out {
                self.renderer.print_info(&format!(
                    "{} sec silence, auto stop. Enter dabao ya phir se bolo.",
                    capture.timeout().as_secs()
                ));
                match lines.recv() {
                    Ok(line) if is_quit(&line) => return Ok(CliModeResult::Finish),
                    Ok(line) if !line.trim().is_empty() => pending = Some(line),
                    Ok(_) => {}
                    Err(_) => return Ok(CliModeResult::Finish),
                }
            }
        }
    }

    fn handle_transcript(
        &self,
        text: &str,
        answers: &mut dyn FnMut() -> Result<Option<String>>,
    ) -> Result<()> {
        match self.hisab.parse_transcript(text) {
            Ok(record) => self.save(&record, answers),
            Err(missing) => {
                self.renderer.print_missing(&missing);
                Ok(())
            }
        }
    }

    /// A failed save in listen mode is shown and the session goes on, so the
    /// user can say it again. Returns whether the transcript went through.
    fn listen_transcript(
        &self,
        text: &str,
        answers: &mut dyn FnMut() -> Result<Option<String>>,
    ) -> bool {
        match self.handle_transcript(text, answers) {
            Ok(()) => true,
            Err(e) => {
                self.renderer.print_error(&format!("{e:#}"));
                false
            }
        }
    }

    fn save(
        &self,
        record: &ParsedRecord,
        answers: &mut dyn FnMut() -> Result<Option<String>>,
    ) -> Result<()> {
        self.renderer.print_record(record);

        let mut prompt_error = None;
        let outcome = self.hisab.save_record(record, |existing| {
            if self.cli.yes {
                return true;
            }
            self.renderer
                .print_question(&self.renderer.overwrite_question(existing));
            match answers() {
                Ok(answer) => answer.is_some_and(|a| is_yes(&a)),
                Err(e) => {
                    prompt_error = Some(e);
                    false
                }
            }
        })?;
        if let Some(e) = prompt_error {
            return Err(e);
        }

        self.renderer.print_save_outcome(&outcome);
        Ok(())
    }

    fn print_recent(&self, snapshot: &[Entry]) {
        let recent = recent_first(snapshot);
        let shown = &recent[..recent.len().min(RECENT_LIMIT)];
        if !shown.is_empty() {
            self.renderer.print_entries(shown);
        }
    }
}

/// Runs one capture session over typed lines. `first` is fed in before
/// waiting for more input.
fn listen_once(
    capture: &mut CaptureSession,
    lines: &Receiver<String>,
    first: Option<String>,
) -> Listened {
    let session = capture.start(Instant::now()).session;
    let mut next = first;
    loop {
        let line = match next.take() {
            Some(line) => line,
            None => match lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(outcome) = capture.poll_timeout(Instant::now()) {
                        return Listened::Ended {
                            outcome,
                            timed_out: true,
                        };
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => return Listened::Quit,
            },
        };
        if is_quit(&line) {
            capture.stop(session);
            return Listened::Quit;
        }
        capture.push_result(session, &line, true, Instant::now());
        if let Some(outcome) = capture.finish(session) {
            return Listened::Ended {
                outcome,
                timed_out: false,
            };
        }
    }
}

/// Stdin lines on a channel, so the capture loop can wait with a timeout.
/// The channel closes at end of input.
fn spawn_line_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("stdin closed");
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use chrono::NaiveDate;
    use clap::Parser;
    use hisab_core::{
        Config,
        capture::DEFAULT_CAPTURE_TIMEOUT,
        config::{DEFAULT_CURRENCY, DEFAULT_DATE_FORMAT},
        keywords::Keywords,
        record::EntryKey,
        store::RecordStore,
    };
    use std::{
        path::PathBuf,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    /// Reads find nothing and every write fails.
    struct BrokenStore {
        writes: Arc<AtomicUsize>,
    }

    impl RecordStore for BrokenStore {
        fn read(&self, _key: &EntryKey) -> Result<Option<Entry>> {
            Ok(None)
        }

        fn write(&self, _record: &ParsedRecord) -> Result<Entry> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            bail!("disk is full")
        }

        fn snapshot(&self) -> Result<Vec<Entry>> {
            Ok(Vec::new())
        }

        fn subscribe(&self) -> Result<Receiver<Vec<Entry>>> {
            let (tx, rx) = mpsc::channel();
            let _ = tx.send(Vec::new());
            Ok(rx)
        }
    }

    fn listening_cli(store: BrokenStore) -> HisabCli {
        let cli = BaseCli::try_parse_from(["hisab", "--listen"]).unwrap();
        let config = Config {
            store_dir: PathBuf::from("hisab"),
            editor: None,
            capture_timeout: DEFAULT_CAPTURE_TIMEOUT,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            reference_date: NaiveDate::from_ymd_opt(2025, 5, 26),
            keywords: Keywords::default(),
        };
        HisabCli::new(cli, Hisab::with_store(config, Box::new(store)))
    }

    fn send_all(lines: &[&str]) -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        for line in lines {
            tx.send(line.to_string()).unwrap();
        }
        rx
    }

    #[test]
    fn typed_line_becomes_transcript() {
        let rx = send_all(&["aaj 150 ka doodh"]);
        let mut capture = CaptureSession::default();
        match listen_once(&mut capture, &rx, None) {
            Listened::Ended {
                outcome: CaptureOutcome::Transcript { text, .. },
                timed_out: false,
            } => assert_eq!(text, "aaj 150 ka doodh"),
            _ => panic!("expected a transcript"),
        }
    }

    #[test]
    fn blank_line_is_no_speech() {
        let rx = send_all(&["   "]);
        let mut capture = CaptureSession::default();
        assert!(matches!(
            listen_once(&mut capture, &rx, None),
            Listened::Ended {
                outcome: CaptureOutcome::NoSpeech { .. },
                timed_out: false
            }
        ));
    }

    #[test]
    fn pending_line_is_used_first() {
        let rx = send_all(&["q"]);
        let mut capture = CaptureSession::default();
        match listen_once(&mut capture, &rx, Some("kal shaam 60 ka doodh".into())) {
            Listened::Ended {
                outcome: CaptureOutcome::Transcript { text, .. },
                ..
            } => assert_eq!(text, "kal shaam 60 ka doodh"),
            _ => panic!("expected a transcript"),
        }
    }

    #[test]
    fn quit_and_end_of_input() {
        let mut capture = CaptureSession::default();
        assert!(matches!(
            listen_once(&mut capture, &send_all(&["q"]), None),
            Listened::Quit
        ));
        assert!(matches!(
            listen_once(&mut capture, &send_all(&[]), None),
            Listened::Quit
        ));
    }

    #[test]
    fn silence_times_out() {
        let (_tx, rx) = mpsc::channel::<String>();
        let mut capture = CaptureSession::new(Duration::from_millis(50));
        assert!(matches!(
            listen_once(&mut capture, &rx, None),
            Listened::Ended {
                outcome: CaptureOutcome::NoSpeech { .. },
                timed_out: true
            }
        ));
    }

    #[test]
    fn failed_save_keeps_listening() {
        let writes = Arc::new(AtomicUsize::new(0));
        let cli = listening_cli(BrokenStore {
            writes: Arc::clone(&writes),
        });
        let mut answers = || -> Result<Option<String>> { Ok(None) };

        let err = cli
            .handle_transcript("aaj shaam 60 ka doodh", &mut answers)
            .unwrap_err();
        assert!(format!("{err:#}").contains("disk is full"));

        assert!(!cli.listen_transcript("aaj shaam 60 ka doodh", &mut answers));
        assert!(!cli.listen_transcript("kal subah 150 ka doodh", &mut answers));
        assert_eq!(writes.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn incomplete_transcript_is_not_a_failure() {
        let writes = Arc::new(AtomicUsize::new(0));
        let cli = listening_cli(BrokenStore {
            writes: Arc::clone(&writes),
        });
        let mut answers = || -> Result<Option<String>> { Ok(None) };

        assert!(cli.listen_transcript("aaj ka doodh", &mut answers));
        assert_eq!(writes.load(Ordering::SeqCst), 0);
    }
}
