use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by either speech session.
///
/// Runtime variants carry the engine's diagnostic code verbatim so the
/// presentation layer can show it to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    /// Speech recognition is not supported by the host environment.
    #[error("speech recognition is not available in this environment")]
    RecognitionUnavailable,

    /// The recognition engine reported a mid-session failure.
    #[error("speech recognition error: {code}")]
    RecognitionRuntime { code: String },

    /// `speak` was called with empty (or whitespace-only) text.
    #[error("no text to speak")]
    SynthesisInputInvalid,

    /// The synthesis engine reported a failure for an active utterance.
    #[error("speech synthesis error: {code}")]
    SynthesisRuntime { code: String },
}

/// Kind tag carried alongside the rendered message in [`ErrorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    RecognitionUnavailable,
    RecognitionRuntime,
    SynthesisInputInvalid,
    SynthesisRuntime,
}

impl ErrorKind {
    /// Whether this kind belongs to the recognition feature.
    pub fn is_recognition(self) -> bool {
        matches!(
            self,
            ErrorKind::RecognitionUnavailable | ErrorKind::RecognitionRuntime
        )
    }

    /// Whether this kind belongs to the synthesis feature.
    pub fn is_synthesis(self) -> bool {
        !self.is_recognition()
    }
}

impl SpeechError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpeechError::RecognitionUnavailable => ErrorKind::RecognitionUnavailable,
            SpeechError::RecognitionRuntime { .. } => ErrorKind::RecognitionRuntime,
            SpeechError::SynthesisInputInvalid => ErrorKind::SynthesisInputInvalid,
            SpeechError::SynthesisRuntime { .. } => ErrorKind::SynthesisRuntime,
        }
    }
}

/// The single most-recent failure shared by both sessions.
///
/// Overwritten by the latest failure from either session (last-writer-wins);
/// cleared by the next successful start-type action of the same feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&SpeechError> for ErrorState {
    fn from(err: &SpeechError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
