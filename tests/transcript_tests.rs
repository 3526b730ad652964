// Unit tests for incremental transcript aggregation
//
// These tests verify the result-ingestion algorithm: final entries are
// committed in delivery order with one trailing separator each, and the
// pending tail always reflects the latest surviving partial.

use voiceflow::{ResultEntry, Transcript};

#[test]
fn test_partial_overwrites_pending() {
    let mut transcript = Transcript::new();

    transcript.apply(&[ResultEntry::partial("hel")]);
    transcript.apply(&[ResultEntry::partial("hello")]);

    assert_eq!(transcript.pending(), "hello", "Latest partial should win");
    assert_eq!(transcript.committed_text(), "", "Partials never commit");
}

#[test]
fn test_final_commits_with_separator() {
    let mut transcript = Transcript::new();

    transcript.apply(&[ResultEntry::partial("hello")]);
    transcript.apply(&[ResultEntry::finalized("hello world")]);

    assert_eq!(
        transcript.committed_text(),
        "hello world ",
        "Each final segment is followed by one separator"
    );
    assert_eq!(transcript.pending(), "", "Final entry clears the pending tail");
}

#[test]
fn test_committed_is_concatenation_in_delivery_order() {
    let mut transcript = Transcript::new();

    transcript.apply(&[ResultEntry::finalized("one")]);
    transcript.apply(&[
        ResultEntry::finalized("two"),
        ResultEntry::finalized("three"),
    ]);

    assert_eq!(transcript.committed_text(), "one two three ");
    assert_eq!(transcript.segments().len(), 3);
}

#[test]
fn test_last_nonfinal_entry_retained_within_batch() {
    let mut transcript = Transcript::new();

    // Earlier partials in the same batch are superseded
    transcript.apply(&[
        ResultEntry::partial("a"),
        ResultEntry::partial("ab"),
        ResultEntry::partial("abc"),
    ]);

    assert_eq!(transcript.pending(), "abc");
}

#[test]
fn test_final_last_in_batch_clears_pending() {
    let mut transcript = Transcript::new();

    transcript.apply(&[
        ResultEntry::partial("hello wor"),
        ResultEntry::finalized("hello world"),
    ]);

    assert_eq!(transcript.committed_text(), "hello world ");
    assert_eq!(
        transcript.pending(),
        "",
        "A trailing final entry leaves no pending tail"
    );
}

#[test]
fn test_partial_after_final_in_batch_survives() {
    let mut transcript = Transcript::new();

    transcript.apply(&[
        ResultEntry::finalized("first sentence"),
        ResultEntry::partial("second sen"),
    ]);

    assert_eq!(transcript.committed_text(), "first sentence ");
    assert_eq!(
        transcript.pending(),
        "second sen",
        "A partial delivered after a final in the same batch is the new tail"
    );
}

#[test]
fn test_clear_resets_everything() {
    let mut transcript = Transcript::new();

    transcript.apply(&[
        ResultEntry::finalized("done"),
        ResultEntry::partial("more"),
    ]);
    transcript.clear();

    assert_eq!(transcript.committed_text(), "");
    assert_eq!(transcript.pending(), "");
    assert!(transcript.segments().is_empty());
}

#[test]
fn test_segments_are_timestamped() {
    let mut transcript = Transcript::new();
    let before = chrono::Utc::now();

    transcript.apply(&[ResultEntry::finalized("hello")]);

    let segment = &transcript.segments()[0];
    assert_eq!(segment.text, "hello");
    assert!(
        segment.finalized_at >= before,
        "Segment should carry the instant it was finalized"
    );
}
