use super::transcript::Transcript;
use crate::engine::{RecognitionEvent, Recognizer, SpeechProvider};
use crate::error::SpeechError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Recognition session status.
///
/// `Error` is entered only on a synchronous start failure; asynchronous
/// engine errors return the session to `Idle` because the engine has already
/// terminated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionStatus {
    Idle,
    Listening,
    Error,
}

/// Owns the listening state machine and transcript aggregation for one
/// recognition session.
pub struct RecognitionController {
    provider: Arc<dyn SpeechProvider>,
    status: RecognitionStatus,
    language: String,
    transcript: Transcript,

    /// Generation of the current recognizer instance. Bumped each time the
    /// recognizer is recreated; events from older generations are discarded.
    generation: u64,
    recognizer: Option<Box<dyn Recognizer>>,
}

impl RecognitionController {
    /// Create a controller bound to `language`.
    ///
    /// If the provider reports recognition unavailable the controller is
    /// constructed disabled: `start()` fails with `RecognitionUnavailable`
    /// and everything else is inert.
    pub fn new(provider: Arc<dyn SpeechProvider>, language: &str) -> Self {
        let generation = 1;
        let recognizer = if provider.recognition_available() {
            match provider.create_recognizer(language, generation) {
                Ok(recognizer) => Some(recognizer),
                Err(err) => {
                    warn!("Failed to create recognizer: {}", err);
                    None
                }
            }
        } else {
            None
        };

        Self {
            provider,
            status: RecognitionStatus::Idle,
            language: language.to_string(),
            transcript: Transcript::new(),
            generation,
            recognizer,
        }
    }

    pub fn status(&self) -> RecognitionStatus {
        self.status
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Start listening. Allowed only from `Idle`.
    ///
    /// Clears both transcripts before asking the engine to capture. A
    /// synchronous engine rejection (e.g. permission denied) moves the
    /// session to `Error` without ever entering `Listening`.
    pub async fn start(&mut self) -> Result<(), SpeechError> {
        if self.status != RecognitionStatus::Idle {
            debug!("Start ignored: session is {:?}", self.status);
            return Ok(());
        }

        let recognizer = self
            .recognizer
            .as_mut()
            .ok_or(SpeechError::RecognitionUnavailable)?;

        self.transcript.clear();

        match recognizer.start().await {
            Ok(()) => {
                info!("Recognition started (language={})", self.language);
                self.status = RecognitionStatus::Listening;
                Ok(())
            }
            Err(err) => {
                warn!("Recognition failed to start: {}", err);
                self.status = RecognitionStatus::Error;
                Err(err)
            }
        }
    }

    /// Request the session to stop.
    ///
    /// From `Listening` this is advisory: the engine may deliver one more
    /// result batch, so the `Idle` transition waits for the `Ended` event.
    /// From `Error` there is no live engine session and the controller
    /// returns to `Idle` immediately. A second `stop()` while `Idle` is a
    /// no-op.
    pub async fn stop(&mut self) {
        match self.status {
            RecognitionStatus::Listening => {
                if let Some(recognizer) = self.recognizer.as_mut() {
                    recognizer.stop().await;
                }
                info!("Recognition stop requested");
            }
            RecognitionStatus::Error => {
                self.status = RecognitionStatus::Idle;
            }
            RecognitionStatus::Idle => {
                debug!("Stop ignored: session already idle");
            }
        }
    }

    /// Clear the accumulated transcript.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Rebind the session to a new language. Allowed only while `Idle`.
    ///
    /// The engine binds language at construction, so the current recognizer
    /// is torn down and a fresh one created under a new generation.
    pub fn set_language(&mut self, tag: &str) -> Result<(), SpeechError> {
        if self.status != RecognitionStatus::Idle {
            warn!("Language change ignored: session is {:?}", self.status);
            return Ok(());
        }
        if tag == self.language {
            return Ok(());
        }
        if self.recognizer.is_none() {
            // Feature disabled at init; nothing to rebind
            self.language = tag.to_string();
            return Ok(());
        }

        info!("Rebinding recognition to language {}", tag);
        self.language = tag.to_string();
        self.generation += 1;
        // Drop the old instance before creating its replacement
        self.recognizer = None;
        self.recognizer = Some(
            self.provider
                .create_recognizer(&self.language, self.generation)?,
        );
        Ok(())
    }

    /// Process one engine event. Returns the failure to surface, if any.
    pub fn handle_event(&mut self, event: RecognitionEvent) -> Option<SpeechError> {
        match event {
            RecognitionEvent::Results {
                generation,
                entries,
            } => {
                if generation != self.generation {
                    debug!("Discarding result batch from stale generation {}", generation);
                    return None;
                }
                if self.status != RecognitionStatus::Listening {
                    debug!("Discarding result batch: session is {:?}", self.status);
                    return None;
                }
                self.transcript.apply(&entries);
                None
            }
            RecognitionEvent::Error { generation, code } => {
                if generation != self.generation {
                    debug!("Discarding error from stale generation {}", generation);
                    return None;
                }
                // The engine terminates the session on error; mirror it
                warn!("Recognition engine error: {}", code);
                self.status = RecognitionStatus::Idle;
                self.transcript.clear_pending();
                Some(SpeechError::RecognitionRuntime { code })
            }
            RecognitionEvent::Ended { generation } => {
                if generation != self.generation {
                    debug!("Discarding end signal from stale generation {}", generation);
                    return None;
                }
                if self.status == RecognitionStatus::Listening {
                    info!("Recognition session ended");
                    self.status = RecognitionStatus::Idle;
                    self.transcript.clear_pending();
                }
                None
            }
        }
    }

    /// Tear the session down on disposal.
    pub async fn shutdown(&mut self) {
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop().await;
        }
        self.recognizer = None;
    }
}
