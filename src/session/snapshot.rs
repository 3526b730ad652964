use crate::engine::VoiceDescriptor;
use crate::error::ErrorState;
use crate::recognition::RecognitionStatus;
use crate::synthesis::SynthesisStatus;
use serde::{Deserialize, Serialize};

/// Read-only view of the recognition session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionSnapshot {
    pub status: RecognitionStatus,
    pub language: String,
    /// Every finalized segment in delivery order, each followed by one space.
    pub committed_transcript: String,
    /// The current unfinalized tail.
    pub pending_transcript: String,
}

/// Read-only view of the synthesis session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisSnapshot {
    pub status: SynthesisStatus,
    pub voice_catalog: Vec<VoiceDescriptor>,
    pub selected_voice: Option<String>,
    pub text: String,
}

/// Immutable combined state pushed to presentation on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub recognition: RecognitionSnapshot,
    pub synthesis: SynthesisSnapshot,
    pub error: Option<ErrorState>,
}
