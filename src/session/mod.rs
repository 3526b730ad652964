//! Speech session coordination
//!
//! This module composes the recognition and synthesis controllers into one
//! session:
//! - routes user intents to the owning sub-controller
//! - unifies both controllers' failures into a single error slot
//! - publishes an immutable state snapshot on every change (push model,
//!   over a `tokio::sync::watch` channel; presentation never polls)
//!
//! Intents and engine events are processed one at a time on a single task,
//! so the controllers need no internal locking.

mod coordinator;
mod intent;
mod snapshot;

pub use coordinator::SpeechSession;
pub use intent::Intent;
pub use snapshot::{RecognitionSnapshot, Snapshot, SynthesisSnapshot};
