use thiserror::Error;

/// Why a capture attempt ended without a transcript.
///
/// Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Kuch bola nahi. Clear bolo aur dobara try!")]
    NoSpeech,
    #[error("Mic capture fail. Permission/hardware check karo!")]
    AudioCapture,
    #[error("Mic permission deny. Settings mein allow karo!")]
    NotAllowed,
    #[error("Session aborted. Dobara start karo!")]
    Aborted,
    #[error("Internet issue. Online raho!")]
    Network,
    #[error("Pehle se sun raha hoon. Ruko ya stop karo!")]
    AlreadyStarted,
    #[error("Voice error: {0}")]
    Other(String),
}

impl CaptureError {
    /// Maps a recognizer error code (`no-speech`, `not-allowed`, ...) to a category.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "no-speech" => CaptureError::NoSpeech,
            "audio-capture" => CaptureError::AudioCapture,
            "not-allowed" | "service-not-allowed" => CaptureError::NotAllowed,
            "aborted" => CaptureError::Aborted,
            "network" => CaptureError::Network,
            "invalid-state" => CaptureError::AlreadyStarted,
            _ => CaptureError::Other(code.to_string()),
        }
    }

    /// The user can simply try again without changing anything.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CaptureError::NoSpeech | CaptureError::Aborted | CaptureError::AlreadyStarted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_recognizer_codes() {
        assert_eq!(CaptureError::from_code("no-speech"), CaptureError::NoSpeech);
        assert_eq!(CaptureError::from_code("audio-capture"), CaptureError::AudioCapture);
        assert_eq!(CaptureError::from_code("not-allowed"), CaptureError::NotAllowed);
        assert_eq!(CaptureError::from_code("aborted"), CaptureError::Aborted);
        assert_eq!(CaptureError::from_code("Network"), CaptureError::Network);
        assert_eq!(CaptureError::from_code("invalid-state"), CaptureError::AlreadyStarted);
        assert_eq!(
            CaptureError::from_code("bad-grammar"),
            CaptureError::Other("bad-grammar".into())
        );
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            CaptureError::NoSpeech.to_string(),
            "Kuch bola nahi. Clear bolo aur dobara try!"
        );
        assert_eq!(CaptureError::Other("x".into()).to_string(), "Voice error: x");
    }

    #[test]
    fn recoverable_categories() {
        assert!(CaptureError::AlreadyStarted.is_recoverable());
        assert!(!CaptureError::NotAllowed.is_recoverable());
    }
}
