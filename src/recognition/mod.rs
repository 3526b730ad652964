//! Recognition session management
//!
//! This module owns the speech-to-text half of a session:
//! - Idle/Listening/Error state machine around one recognizer instance
//! - Incremental transcript aggregation (committed segments + pending tail)
//! - Language binding, including recognizer teardown/recreation on change
//!
//! All terminal state transitions are driven by engine events, never by the
//! call site, so a late callback for a stopped session cannot corrupt state.

mod controller;
mod transcript;

pub use controller::{RecognitionController, RecognitionStatus};
pub use transcript::{Transcript, TranscriptSegment};
