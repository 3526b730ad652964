use super::events::{
    EngineEvent, RecognitionEvent, ResultEntry, SynthesisEvent, VoiceDescriptor,
};
use super::{Recognizer, SpeechProvider, Synthesizer, UtteranceRequest};
use crate::error::SpeechError;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::debug;

/// A call made into the scripted engine, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    RecognizerCreated { language: String, generation: u64 },
    RecognitionStarted { generation: u64 },
    RecognitionStopRequested { generation: u64 },
    UtteranceSubmitted { id: u64, text: String, voice: Option<String> },
    SpeechCancelled,
}

#[derive(Default)]
struct ScriptedState {
    recognition_available: bool,
    fail_next_start: bool,
    calls: Vec<EngineCall>,
}

/// In-memory speech engine driven entirely by the caller.
///
/// Records every call made into it and emits events only when told to, so a
/// test (or the demo binary) controls exactly when "the engine" acknowledges
/// starts, delivers result batches, or reports voices. Fills the same role
/// the file-based audio backend does for live capture in a recording
/// pipeline: deterministic input for everything downstream.
pub struct ScriptedEngine {
    events: mpsc::UnboundedSender<EngineEvent>,
    shared: Arc<Mutex<ScriptedState>>,
}

impl ScriptedEngine {
    /// Create a scripted engine that reports recognition as available.
    pub fn new(events: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self {
            events,
            shared: Arc::new(Mutex::new(ScriptedState {
                recognition_available: true,
                ..ScriptedState::default()
            })),
        }
    }

    /// Create a scripted engine for a host without speech recognition.
    pub fn without_recognition(events: mpsc::UnboundedSender<EngineEvent>) -> Self {
        Self {
            events,
            shared: Arc::new(Mutex::new(ScriptedState::default())),
        }
    }

    /// Make the next `Recognizer::start` call fail synchronously, as a host
    /// does when microphone permission is denied at call time.
    pub fn fail_next_start(&self) {
        self.state().fail_next_start = true;
    }

    /// Every call made into the engine so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state().calls.clone()
    }

    /// Deliver (or redeliver) the voice catalog.
    pub fn deliver_voices(&self, voices: Vec<VoiceDescriptor>) {
        self.emit(EngineEvent::Synthesis(SynthesisEvent::VoicesChanged {
            voices,
        }));
    }

    /// Emit a recognition result batch for the given session generation.
    pub fn emit_results(&self, generation: u64, entries: Vec<ResultEntry>) {
        self.emit(EngineEvent::Recognition(RecognitionEvent::Results {
            generation,
            entries,
        }));
    }

    /// Emit a mid-session recognition failure.
    pub fn emit_recognition_error(&self, generation: u64, code: &str) {
        self.emit(EngineEvent::Recognition(RecognitionEvent::Error {
            generation,
            code: code.to_string(),
        }));
    }

    /// Emit the end-of-session signal.
    pub fn emit_recognition_ended(&self, generation: u64) {
        self.emit(EngineEvent::Recognition(RecognitionEvent::Ended {
            generation,
        }));
    }

    /// Acknowledge that playback of an utterance began.
    pub fn emit_utterance_started(&self, id: u64) {
        self.emit(EngineEvent::Synthesis(SynthesisEvent::UtteranceStarted {
            id,
        }));
    }

    /// Signal that playback of an utterance finished.
    pub fn emit_utterance_ended(&self, id: u64) {
        self.emit(EngineEvent::Synthesis(SynthesisEvent::UtteranceEnded { id }));
    }

    /// Signal that playback of an utterance failed.
    pub fn emit_utterance_error(&self, id: u64, code: &str) {
        self.emit(EngineEvent::Synthesis(SynthesisEvent::UtteranceError {
            id,
            code: code.to_string(),
        }));
    }

    fn emit(&self, event: EngineEvent) {
        // The receiver may already be gone during teardown
        if self.events.send(event).is_err() {
            debug!("Event channel closed; scripted event dropped");
        }
    }

    fn state(&self) -> MutexGuard<'_, ScriptedState> {
        self.shared.lock().expect("scripted engine state poisoned")
    }
}

struct ScriptedRecognizer {
    language: String,
    generation: u64,
    shared: Arc<Mutex<ScriptedState>>,
}

#[async_trait::async_trait]
impl Recognizer for ScriptedRecognizer {
    async fn start(&mut self) -> Result<(), SpeechError> {
        let mut state = self.shared.lock().expect("scripted engine state poisoned");
        if state.fail_next_start {
            state.fail_next_start = false;
            return Err(SpeechError::RecognitionRuntime {
                code: "not-allowed".to_string(),
            });
        }
        state.calls.push(EngineCall::RecognitionStarted {
            generation: self.generation,
        });
        Ok(())
    }

    async fn stop(&mut self) {
        self.shared
            .lock()
            .expect("scripted engine state poisoned")
            .calls
            .push(EngineCall::RecognitionStopRequested {
                generation: self.generation,
            });
    }

    fn language(&self) -> &str {
        &self.language
    }
}

struct ScriptedSynthesizer {
    shared: Arc<Mutex<ScriptedState>>,
}

#[async_trait::async_trait]
impl Synthesizer for ScriptedSynthesizer {
    async fn speak(&mut self, request: UtteranceRequest) -> Result<(), SpeechError> {
        self.shared
            .lock()
            .expect("scripted engine state poisoned")
            .calls
            .push(EngineCall::UtteranceSubmitted {
                id: request.id,
                text: request.text,
                voice: request.voice,
            });
        Ok(())
    }

    async fn cancel(&mut self) {
        self.shared
            .lock()
            .expect("scripted engine state poisoned")
            .calls
            .push(EngineCall::SpeechCancelled);
    }
}

impl SpeechProvider for ScriptedEngine {
    fn recognition_available(&self) -> bool {
        self.state().recognition_available
    }

    fn create_recognizer(
        &self,
        language: &str,
        generation: u64,
    ) -> Result<Box<dyn Recognizer>, SpeechError> {
        let mut state = self.state();
        if !state.recognition_available {
            return Err(SpeechError::RecognitionUnavailable);
        }
        state.calls.push(EngineCall::RecognizerCreated {
            language: language.to_string(),
            generation,
        });
        Ok(Box::new(ScriptedRecognizer {
            language: language.to_string(),
            generation,
            shared: Arc::clone(&self.shared),
        }))
    }

    fn create_synthesizer(&self) -> Box<dyn Synthesizer> {
        Box::new(ScriptedSynthesizer {
            shared: Arc::clone(&self.shared),
        })
    }
}
