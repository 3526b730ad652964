use serde::{Deserialize, Serialize};

/// A voice offered by the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    /// Engine-unique voice name, used as the selection key.
    pub name: String,
    /// BCP-47 tag of the language the voice speaks.
    pub language: String,
}

/// One entry of a recognition result batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// Recognized text for this entry.
    pub text: String,
    /// Whether the engine has committed to this hypothesis. Each entry is
    /// delivered as final at most once.
    pub is_final: bool,
}

impl ResultEntry {
    pub fn partial(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: false,
        }
    }

    pub fn finalized(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_final: true,
        }
    }
}

/// Asynchronous signals from a recognition session.
///
/// Every variant carries the generation of the recognizer instance that
/// produced it; the controller discards events from stale generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// A batch of result entries from the engine's result cursor onward.
    Results {
        generation: u64,
        entries: Vec<ResultEntry>,
    },
    /// The engine failed mid-session and terminated it.
    Error { generation: u64, code: String },
    /// The session has fully stopped (after `stop()` or on its own).
    Ended { generation: u64 },
}

/// Asynchronous signals from the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEvent {
    /// The engine began audible playback of the identified utterance.
    UtteranceStarted { id: u64 },
    /// Playback of the identified utterance finished (or was cancelled).
    UtteranceEnded { id: u64 },
    /// Playback of the identified utterance failed.
    UtteranceError { id: u64, code: String },
    /// The voice catalog was (re)delivered. May fire zero or more times, and
    /// some engines redeliver the full list each time.
    VoicesChanged { voices: Vec<VoiceDescriptor> },
}

/// Any engine signal, as delivered on the provider's event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Recognition(RecognitionEvent),
    Synthesis(SynthesisEvent),
}
