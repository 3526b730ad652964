//! Speech engine abstraction
//!
//! This module isolates the host's speech subsystem behind capability traits:
//! - `SpeechProvider`: detects recognition support and constructs engine handles
//! - `Recognizer`: one streaming speech-to-text session, bound to a language
//! - `Synthesizer`: text-to-speech playback with a selectable voice
//!
//! All asynchronous engine signals (results, errors, session end, utterance
//! lifecycle, voice catalog updates) are delivered as [`EngineEvent`] values
//! on an mpsc channel supplied at provider construction. Calls into the
//! engine return immediately; completion is observed on the channel.

mod events;
mod scripted;

use crate::error::SpeechError;

pub use events::{EngineEvent, RecognitionEvent, ResultEntry, SynthesisEvent, VoiceDescriptor};
pub use scripted::{EngineCall, ScriptedEngine};

/// One text-to-speech playback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRequest {
    /// Monotonically increasing utterance token; engine callbacks echo it back
    /// so stale events for superseded utterances can be discarded.
    pub id: u64,
    /// Text to speak.
    pub text: String,
    /// Voice name, or `None` for the engine default.
    pub voice: Option<String>,
}

/// A streaming speech-to-text session.
///
/// The language is bound at construction and immutable afterwards; changing
/// language means tearing this instance down and creating a new one.
#[async_trait::async_trait]
pub trait Recognizer: Send {
    /// Begin capturing. Fails synchronously if the engine rejects the request
    /// at call time (e.g. microphone permission denied).
    async fn start(&mut self) -> Result<(), SpeechError>;

    /// Request the engine to stop capturing.
    ///
    /// Advisory: the session is over only once the engine delivers its
    /// `Ended` event, which may arrive after one more result batch.
    async fn stop(&mut self);

    /// The BCP-47 language tag this session is bound to.
    fn language(&self) -> &str;
}

/// A text-to-speech playback handle.
#[async_trait::async_trait]
pub trait Synthesizer: Send {
    /// Submit an utterance for playback. The engine acknowledges playback via
    /// `UtteranceStarted` and completion via `UtteranceEnded`/`UtteranceError`.
    async fn speak(&mut self, request: UtteranceRequest) -> Result<(), SpeechError>;

    /// Cancel any in-flight utterance. Idempotent if none is active.
    async fn cancel(&mut self);
}

/// Capability provider for the host's speech subsystem.
///
/// Implementations:
/// - `ScriptedEngine`: in-memory engine driven by the caller (tests, demos)
/// - host bindings (browser Web Speech API, platform speech services)
pub trait SpeechProvider: Send + Sync {
    /// Whether speech recognition is supported in this environment.
    fn recognition_available(&self) -> bool;

    /// Create a recognition session bound to `language`.
    ///
    /// Events for this session carry `generation` so the controller can
    /// discard callbacks from torn-down sessions.
    fn create_recognizer(
        &self,
        language: &str,
        generation: u64,
    ) -> Result<Box<dyn Recognizer>, SpeechError>;

    /// Create the synthesis handle. Synthesis is assumed present; hosts
    /// without it may return a handle that fails every `speak`.
    fn create_synthesizer(&self) -> Box<dyn Synthesizer>;
}
