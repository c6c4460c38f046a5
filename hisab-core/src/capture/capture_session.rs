use super::capture_error::CaptureError;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle of one capture attempt. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CaptureState {
    Idle,
    Listening,
    Finalizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureStart {
    pub session: SessionId,
    /// The session that was still open and got aborted by this start.
    pub aborted: Option<SessionId>,
}

/// How a session ended. Each session ends exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Transcript {
        session: SessionId,
        text: String,
    },
    NoSpeech {
        session: SessionId,
    },
    Failed {
        session: SessionId,
        error: CaptureError,
    },
}

impl CaptureOutcome {
    pub fn session(&self) -> SessionId {
        match self {
            CaptureOutcome::Transcript { session, .. }
            | CaptureOutcome::NoSpeech { session }
            | CaptureOutcome::Failed { session, .. } => *session,
        }
    }
}

#[derive(Debug)]
struct Active {
    id: SessionId,
    state: CaptureState,
    transcript: String,
    interim: String,
    last_activity: Instant,
}

impl Active {
    fn push_final(&mut self, part: &str) {
        let part = part.trim();
        if part.is_empty() {
            return;
        }
        if !self.transcript.is_empty() {
            self.transcript.push(' ');
        }
        self.transcript.push_str(part);
    }
}

/// Drives one capture at a time from `Idle` through `Listening` and
/// `Finalizing` back to `Idle`.
///
/// The session never reads a clock; callers pass `now` so timeouts are
/// deterministic under test.
#[derive(Debug)]
pub struct CaptureSession {
    timeout: Duration,
    next_id: u64,
    active: Option<Active>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_TIMEOUT)
    }
}

impl CaptureSession {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            next_id: 1,
            active: None,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn state(&self) -> CaptureState {
        self.active
            .as_ref()
            .map_or(CaptureState::Idle, |active| active.state)
    }

    pub fn current(&self) -> Option<SessionId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Final transcript collected so far by the open session.
    pub fn transcript(&self) -> &str {
        self.active.as_ref().map_or("", |a| a.transcript.as_str())
    }

    pub fn interim(&self) -> &str {
        self.active.as_ref().map_or("", |a| a.interim.as_str())
    }

    /// Opens a new session, aborting the open one if any.
    pub fn start(&mut self, now: Instant) -> CaptureStart {
        let aborted = self.active.take().map(|previous| {
            debug!(session = %previous.id, "capture aborted by new start");
            previous.id
        });

        let session = SessionId(self.next_id);
        self.next_id += 1;
        self.active = Some(Active {
            id: session,
            state: CaptureState::Listening,
            transcript: String::new(),
            interim: String::new(),
            last_activity: now,
        });
        debug!(%session, "capture listening");

        CaptureStart { session, aborted }
    }

    /// Feeds one recognizer result. Returns `false` when `session` is not the
    /// open session.
    pub fn push_result(&mut self, session: SessionId, text: &str, is_final: bool, now: Instant) -> bool {
        let Some(active) = self.active_mut(session) else {
            return false;
        };
        active.last_activity = now;
        if is_final {
            active.interim.clear();
            active.push_final(text);
        } else {
            active.interim = text.trim().to_string();
        }
        true
    }

    /// User asked to stop. Late final results are still accepted until
    /// [`finish`](Self::finish).
    pub fn stop(&mut self, session: SessionId) -> bool {
        let Some(active) = self.active_mut(session) else {
            return false;
        };
        active.state = CaptureState::Finalizing;
        debug!(%session, "capture finalizing");
        true
    }

    /// The recognizer ended on its own or after [`stop`](Self::stop).
    pub fn finish(&mut self, session: SessionId) -> Option<CaptureOutcome> {
        self.active_mut(session)?;
        self.terminate()
    }

    pub fn fail(&mut self, session: SessionId, error: CaptureError) -> Option<CaptureOutcome> {
        self.active_mut(session)?;
        self.active = None;
        debug!(%session, %error, "capture failed");
        Some(CaptureOutcome::Failed { session, error })
    }

    /// Ends the open session once nothing was heard for the configured timeout.
    pub fn poll_timeout(&mut self, now: Instant) -> Option<CaptureOutcome> {
        let active = self.active.as_ref()?;
        if now.saturating_duration_since(active.last_activity) < self.timeout {
            return None;
        }
        debug!(session = %active.id, "capture timed out");
        self.terminate()
    }

    fn active_mut(&mut self, session: SessionId) -> Option<&mut Active> {
        self.active.as_mut().filter(|active| active.id == session)
    }

    fn terminate(&mut self) -> Option<CaptureOutcome> {
        let active = self.active.take()?;
        let session = active.id;
        let text = active.transcript.trim();
        let outcome = if text.is_empty() {
            CaptureOutcome::NoSpeech { session }
        } else {
            CaptureOutcome::Transcript {
                session,
                text: text.to_string(),
            }
        };
        debug!(%session, ?outcome, "capture ended");
        Some(outcome)
    }
}
