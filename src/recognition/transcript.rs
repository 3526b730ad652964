use crate::engine::ResultEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single finalized transcript segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Finalized text, immutable once delivered by the engine.
    pub text: String,

    /// When the engine committed to this segment.
    pub finalized_at: DateTime<Utc>,
}

/// Aggregates incremental recognition results into a stable transcript.
///
/// Committed segments are append-only; the pending tail is replaced wholesale
/// by each incoming partial and cleared once a final entry supersedes it.
#[derive(Debug, Default)]
pub struct Transcript {
    segments: Vec<TranscriptSegment>,
    pending: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one result batch, entries in delivery order.
    ///
    /// Final entries are committed atomically and clear the pending tail;
    /// each non-final entry overwrites the tail (earlier partials in the same
    /// batch are superseded by later ones).
    pub fn apply(&mut self, entries: &[ResultEntry]) {
        for entry in entries {
            if entry.is_final {
                self.segments.push(TranscriptSegment {
                    text: entry.text.clone(),
                    finalized_at: Utc::now(),
                });
                self.pending.clear();
            } else {
                self.pending = entry.text.clone();
            }
        }
    }

    /// The committed transcript: every finalized segment in delivery order,
    /// each followed by one separating space.
    pub fn committed_text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            text.push_str(&segment.text);
            text.push(' ');
        }
        text
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Explicit clear: the only way the committed transcript shrinks.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.pending.clear();
    }
}
