use super::catalog::VoiceCatalog;
use crate::engine::{SpeechProvider, SynthesisEvent, Synthesizer, UtteranceRequest, VoiceDescriptor};
use crate::error::SpeechError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Synthesis session status.
///
/// Engine errors return the session to `Idle` (the failure itself travels on
/// the shared error slot), so there is no resting error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisStatus {
    Idle,
    Speaking,
}

/// Owns the speaking state machine, staged text, and voice selection.
pub struct SynthesisController {
    synthesizer: Box<dyn Synthesizer>,
    status: SynthesisStatus,
    catalog: VoiceCatalog,
    text: String,

    /// Next utterance token to hand out.
    next_utterance_id: u64,
    /// Token of the utterance currently submitted to the engine, if any.
    /// Engine callbacks carrying any other token are stale and discarded.
    active_utterance: Option<u64>,
}

impl SynthesisController {
    pub fn new(provider: &dyn SpeechProvider) -> Self {
        Self {
            synthesizer: provider.create_synthesizer(),
            status: SynthesisStatus::Idle,
            catalog: VoiceCatalog::new(),
            text: String::new(),
            next_utterance_id: 1,
            active_utterance: None,
        }
    }

    pub fn status(&self) -> SynthesisStatus {
        self.status
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voices(&self) -> &[VoiceDescriptor] {
        self.catalog.voices()
    }

    pub fn selected_voice(&self) -> Option<&str> {
        self.catalog.selected()
    }

    /// Stage the text to speak. Independent of session status.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    /// Submit the staged text for playback.
    ///
    /// Rejects trimmed-empty text without touching the engine or any state.
    /// Otherwise cancels any in-flight utterance first (the engine plays at
    /// most one at a time) and submits a new one bound to the selected voice
    /// when it resolves, the engine default otherwise. Status stays `Idle`
    /// until the engine acknowledges playback start.
    pub async fn speak(&mut self) -> Result<(), SpeechError> {
        if self.text.trim().is_empty() {
            return Err(SpeechError::SynthesisInputInvalid);
        }

        self.synthesizer.cancel().await;

        let id = self.next_utterance_id;
        self.next_utterance_id += 1;
        let voice = self.catalog.resolve().map(|v| v.name.clone());

        info!("Submitting utterance {} (voice={:?})", id, voice);
        self.active_utterance = Some(id);

        match self
            .synthesizer
            .speak(UtteranceRequest {
                id,
                text: self.text.clone(),
                voice,
            })
            .await
        {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("Utterance {} rejected by engine: {}", id, err);
                self.active_utterance = None;
                self.status = SynthesisStatus::Idle;
                Err(err)
            }
        }
    }

    /// Request cancellation of the active utterance.
    ///
    /// The `Idle` transition arrives with the engine's end/error signal for
    /// that utterance, symmetric with recognition's stop.
    pub async fn stop(&mut self) {
        if self.active_utterance.is_none() {
            debug!("Stop ignored: no active utterance");
            return;
        }
        self.synthesizer.cancel().await;
        info!("Speech cancellation requested");
    }

    /// Select a voice by name. Pure state update, no engine call.
    ///
    /// Rejected as a no-op while `Speaking` so the voice never switches
    /// mid-utterance.
    pub fn select_voice(&mut self, name: &str) {
        if self.status == SynthesisStatus::Speaking {
            debug!("Voice change ignored while speaking");
            return;
        }
        self.catalog.select(name);
    }

    /// Process one engine event. Returns the failure to surface, if any.
    pub fn handle_event(&mut self, event: SynthesisEvent) -> Option<SpeechError> {
        match event {
            SynthesisEvent::VoicesChanged { voices } => {
                debug!("Voice catalog delivery: {} voices", voices.len());
                self.catalog.merge(voices);
                None
            }
            SynthesisEvent::UtteranceStarted { id } => {
                if self.active_utterance == Some(id) {
                    info!("Utterance {} started", id);
                    self.status = SynthesisStatus::Speaking;
                } else {
                    debug!("Discarding start signal for stale utterance {}", id);
                }
                None
            }
            SynthesisEvent::UtteranceEnded { id } => {
                if self.active_utterance == Some(id) {
                    info!("Utterance {} ended", id);
                    self.status = SynthesisStatus::Idle;
                    self.active_utterance = None;
                } else {
                    debug!("Discarding end signal for stale utterance {}", id);
                }
                None
            }
            SynthesisEvent::UtteranceError { id, code } => {
                if self.active_utterance == Some(id) {
                    warn!("Utterance {} failed: {}", id, code);
                    self.status = SynthesisStatus::Idle;
                    self.active_utterance = None;
                    Some(SpeechError::SynthesisRuntime { code })
                } else {
                    debug!("Discarding error for stale utterance {}", id);
                    None
                }
            }
        }
    }

    /// Tear the session down on disposal.
    pub async fn shutdown(&mut self) {
        if self.active_utterance.is_some() {
            self.synthesizer.cancel().await;
        }
    }
}
