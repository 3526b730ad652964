//! Synthesis session management
//!
//! This module owns the text-to-speech half of a session:
//! - Idle/Speaking state machine around the shared synthesizer handle
//! - Voice catalog caching with merge-by-name refresh and one-shot
//!   auto-selection
//! - Single-utterance-at-a-time discipline: a new utterance first cancels
//!   any in-flight one, and stale utterance callbacks are discarded by id
//!
//! `Speaking` is confirmed, not assumed: status flips only on the engine's
//! start acknowledgment, and back to idle only on its end/error signal.

mod catalog;
mod controller;

pub use catalog::VoiceCatalog;
pub use controller::{SynthesisController, SynthesisStatus};
