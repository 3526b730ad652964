pub mod config;
pub mod engine;
pub mod error;
pub mod recognition;
pub mod session;
pub mod synthesis;

pub use config::{Config, LanguageOption, SessionConfig};
pub use engine::{
    EngineCall, EngineEvent, RecognitionEvent, Recognizer, ResultEntry, ScriptedEngine,
    SpeechProvider, SynthesisEvent, Synthesizer, UtteranceRequest, VoiceDescriptor,
};
pub use error::{ErrorKind, ErrorState, SpeechError};
pub use recognition::{RecognitionController, RecognitionStatus, Transcript, TranscriptSegment};
pub use session::{Intent, RecognitionSnapshot, Snapshot, SpeechSession, SynthesisSnapshot};
pub use synthesis::{SynthesisController, SynthesisStatus, VoiceCatalog};
