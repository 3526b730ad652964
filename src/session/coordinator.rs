use super::intent::Intent;
use super::snapshot::{RecognitionSnapshot, Snapshot, SynthesisSnapshot};
use crate::config::SessionConfig;
use crate::engine::{EngineEvent, SpeechProvider};
use crate::error::{ErrorKind, ErrorState, SpeechError};
use crate::recognition::{RecognitionController, RecognitionStatus};
use crate::synthesis::SynthesisController;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Composes both speech controllers into one interactive session.
///
/// Routes user intents to the owning sub-controller, funnels both
/// controllers' failures into one error slot, and publishes a fresh
/// [`Snapshot`] after every intent and every engine event.
pub struct SpeechSession {
    session_id: String,
    recognition: RecognitionController,
    synthesis: SynthesisController,
    error: Option<ErrorState>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl SpeechSession {
    /// Create a session bound to the configured default language.
    ///
    /// If the host has no speech recognition, that is surfaced here, once;
    /// the recognition feature stays disabled while synthesis remains fully
    /// usable.
    pub fn new(provider: Arc<dyn SpeechProvider>, config: &SessionConfig) -> Self {
        let session_id = format!("session-{}", uuid::Uuid::new_v4());
        info!("Creating speech session: {}", session_id);

        let error = if provider.recognition_available() {
            None
        } else {
            warn!("Speech recognition unavailable in this environment");
            Some(ErrorState::from(&SpeechError::RecognitionUnavailable))
        };

        let recognition =
            RecognitionController::new(Arc::clone(&provider), &config.default_language);
        let synthesis = SynthesisController::new(provider.as_ref());

        let initial = compose_snapshot(&recognition, &synthesis, &error);
        let (snapshot_tx, _) = watch::channel(initial);

        Self {
            session_id,
            recognition,
            synthesis,
            error,
            snapshot_tx,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Subscribe to snapshot updates (push model).
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// The current combined state.
    pub fn snapshot(&self) -> Snapshot {
        compose_snapshot(&self.recognition, &self.synthesis, &self.error)
    }

    /// Apply one user intent and publish the resulting snapshot.
    pub async fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::ToggleRecording => match self.recognition.status() {
                RecognitionStatus::Listening | RecognitionStatus::Error => {
                    self.recognition.stop().await;
                }
                RecognitionStatus::Idle => match self.recognition.start().await {
                    Ok(()) => self.clear_error_if(ErrorKind::is_recognition),
                    Err(err) => self.report(err),
                },
            },
            Intent::ClearTranscript => self.recognition.clear_transcript(),
            Intent::SetLanguage(tag) => {
                // Presentation disables the control while listening, but the
                // coordinator must not trust that
                if self.recognition.status() == RecognitionStatus::Idle {
                    if let Err(err) = self.recognition.set_language(&tag) {
                        self.report(err);
                    }
                } else {
                    warn!("Language change rejected: recognition is not idle");
                }
            }
            Intent::SetText(text) => self.synthesis.set_text(text),
            Intent::Speak => match self.synthesis.speak().await {
                Ok(()) => self.clear_error_if(ErrorKind::is_synthesis),
                Err(err) => self.report(err),
            },
            Intent::StopSpeaking => self.synthesis.stop().await,
            Intent::SelectVoice(name) => self.synthesis.select_voice(&name),
            Intent::ClearText => self.synthesis.clear_text(),
        }
        self.publish();
    }

    /// Process one engine event and publish the resulting snapshot.
    pub async fn handle_engine_event(&mut self, event: EngineEvent) {
        let fault = match event {
            EngineEvent::Recognition(ev) => self.recognition.handle_event(ev),
            EngineEvent::Synthesis(ev) => self.synthesis.handle_event(ev),
        };
        if let Some(err) = fault {
            self.report(err);
        }
        self.publish();
    }

    /// Drive the session from its two inbound channels.
    ///
    /// Messages are processed one at a time to completion on this single
    /// task. The loop ends when the intent channel closes (presentation
    /// dropped its handle); a closed event channel only disables that branch.
    pub async fn run(
        &mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
        mut events: mpsc::UnboundedReceiver<EngineEvent>,
    ) {
        info!("Speech session {} running", self.session_id);
        loop {
            tokio::select! {
                maybe_intent = intents.recv() => match maybe_intent {
                    Some(intent) => self.apply(intent).await,
                    None => break,
                },
                Some(event) = events.recv() => self.handle_engine_event(event).await,
            }
        }
        self.shutdown().await;
    }

    /// Tear both sessions down.
    pub async fn shutdown(&mut self) {
        info!("Shutting down speech session: {}", self.session_id);
        self.recognition.shutdown().await;
        self.synthesis.shutdown().await;
        self.publish();
    }

    fn report(&mut self, err: SpeechError) {
        error!("Session error: {}", err);
        // Last writer wins across both sessions
        self.error = Some(ErrorState::from(&err));
    }

    /// Clear the error slot iff its kind matches the feature that just
    /// started successfully; errors from the other feature stay visible.
    fn clear_error_if(&mut self, matches: fn(ErrorKind) -> bool) {
        if self.error.as_ref().is_some_and(|e| matches(e.kind)) {
            self.error = None;
        }
    }

    fn publish(&mut self) {
        let snapshot = compose_snapshot(&self.recognition, &self.synthesis, &self.error);
        self.snapshot_tx.send_replace(snapshot);
    }
}

fn compose_snapshot(
    recognition: &RecognitionController,
    synthesis: &SynthesisController,
    error: &Option<ErrorState>,
) -> Snapshot {
    Snapshot {
        recognition: RecognitionSnapshot {
            status: recognition.status(),
            language: recognition.language().to_string(),
            committed_transcript: recognition.transcript().committed_text(),
            pending_transcript: recognition.transcript().pending().to_string(),
        },
        synthesis: SynthesisSnapshot {
            status: synthesis.status(),
            voice_catalog: synthesis.voices().to_vec(),
            selected_voice: synthesis.selected_voice().map(String::from),
            text: synthesis.text().to_string(),
        },
        error: error.clone(),
    }
}
