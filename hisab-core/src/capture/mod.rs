mod capture_error;
mod capture_session;

pub use capture_error::CaptureError;
pub use capture_session::{
    CaptureOutcome, CaptureSession, CaptureStart, CaptureState, DEFAULT_CAPTURE_TIMEOUT, SessionId,
};
