// Tests for the recognition session controller
//
// These drive the Idle/Listening/Error state machine directly with scripted
// engine events, including the race where engine callbacks arrive after the
// user-initiated call.

use std::sync::Arc;
use voiceflow::{
    EngineCall, RecognitionController, RecognitionEvent, RecognitionStatus, ResultEntry,
    ScriptedEngine, SpeechError, SpeechProvider,
};

fn controller_with_engine() -> (RecognitionController, Arc<ScriptedEngine>) {
    let (events_tx, _events_rx) = tokio::sync::mpsc::unbounded_channel();
    let engine = Arc::new(ScriptedEngine::new(events_tx));
    let provider: Arc<dyn SpeechProvider> = engine.clone();
    let controller = RecognitionController::new(provider, "en-US");
    (controller, engine)
}

#[tokio::test]
async fn test_start_enters_listening_and_clears_transcript() {
    let (mut controller, engine) = controller_with_engine();

    controller.start().await.expect("start should succeed");
    controller.handle_event(RecognitionEvent::Results {
        generation: 1,
        entries: vec![ResultEntry::finalized("leftover")],
    });
    controller.stop().await;
    controller.handle_event(RecognitionEvent::Ended { generation: 1 });

    controller.start().await.expect("restart should succeed");

    assert_eq!(controller.status(), RecognitionStatus::Listening);
    assert_eq!(
        controller.transcript().committed_text(),
        "",
        "Restart must clear the committed transcript"
    );
    assert!(engine
        .calls()
        .contains(&EngineCall::RecognitionStarted { generation: 1 }));
}

#[tokio::test]
async fn test_sync_start_failure_enters_error_not_listening() {
    let (mut controller, engine) = controller_with_engine();
    engine.fail_next_start();

    let result = controller.start().await;

    assert!(
        matches!(result, Err(SpeechError::RecognitionRuntime { .. })),
        "Synchronous rejection should surface as a runtime error"
    );
    assert_eq!(controller.status(), RecognitionStatus::Error);

    // stop() recovers the session from Error
    controller.stop().await;
    assert_eq!(controller.status(), RecognitionStatus::Idle);
}

#[tokio::test]
async fn test_stop_waits_for_engine_end_signal() {
    let (mut controller, _engine) = controller_with_engine();
    controller.start().await.expect("start should succeed");

    controller.stop().await;
    assert_eq!(
        controller.status(),
        RecognitionStatus::Listening,
        "stop() is advisory; the Idle transition comes from the engine"
    );

    // The engine may emit one more result batch before ending
    controller.handle_event(RecognitionEvent::Results {
        generation: 1,
        entries: vec![ResultEntry::finalized("last words")],
    });
    controller.handle_event(RecognitionEvent::Ended { generation: 1 });

    assert_eq!(controller.status(), RecognitionStatus::Idle);
    assert_eq!(controller.transcript().committed_text(), "last words ");
    assert_eq!(controller.transcript().pending(), "");
}

#[tokio::test]
async fn test_stop_twice_is_noop() {
    let (mut controller, engine) = controller_with_engine();
    controller.start().await.expect("start should succeed");
    controller.stop().await;
    controller.handle_event(RecognitionEvent::Ended { generation: 1 });

    let calls_before = engine.calls().len();
    controller.stop().await;

    assert_eq!(controller.status(), RecognitionStatus::Idle);
    assert_eq!(
        engine.calls().len(),
        calls_before,
        "A second stop while idle must not reach the engine"
    );
}

#[tokio::test]
async fn test_async_engine_error_forces_idle() {
    let (mut controller, _engine) = controller_with_engine();
    controller.start().await.expect("start should succeed");
    controller.handle_event(RecognitionEvent::Results {
        generation: 1,
        entries: vec![ResultEntry::partial("hel")],
    });

    let fault = controller.handle_event(RecognitionEvent::Error {
        generation: 1,
        code: "no-speech".to_string(),
    });

    assert_eq!(
        fault,
        Some(SpeechError::RecognitionRuntime {
            code: "no-speech".to_string()
        })
    );
    assert_eq!(
        controller.status(),
        RecognitionStatus::Idle,
        "The engine auto-terminates on error; the controller mirrors it"
    );
    assert_eq!(controller.transcript().pending(), "");
}

#[tokio::test]
async fn test_results_ignored_when_not_listening() {
    let (mut controller, _engine) = controller_with_engine();

    controller.handle_event(RecognitionEvent::Results {
        generation: 1,
        entries: vec![ResultEntry::finalized("ghost")],
    });

    assert_eq!(
        controller.transcript().committed_text(),
        "",
        "Results outside a listening session must be discarded"
    );
}

#[tokio::test]
async fn test_language_change_recreates_recognizer() {
    let (mut controller, engine) = controller_with_engine();

    controller
        .set_language("fr-FR")
        .expect("language change while idle should succeed");

    assert_eq!(controller.language(), "fr-FR");
    assert!(
        engine.calls().contains(&EngineCall::RecognizerCreated {
            language: "fr-FR".to_string(),
            generation: 2,
        }),
        "The engine binds language at construction, so a new instance is required"
    );
}

#[tokio::test]
async fn test_language_change_rejected_while_listening() {
    let (mut controller, engine) = controller_with_engine();
    controller.start().await.expect("start should succeed");
    let calls_before = engine.calls().len();

    controller
        .set_language("de-DE")
        .expect("rejection is a no-op, not an error");

    assert_eq!(controller.language(), "en-US", "Language must not change");
    assert_eq!(
        engine.calls().len(),
        calls_before,
        "No engine teardown while listening"
    );
}

#[tokio::test]
async fn test_stale_generation_events_discarded() {
    let (mut controller, _engine) = controller_with_engine();
    controller
        .set_language("fr-FR")
        .expect("language change should succeed");
    controller.start().await.expect("start should succeed");

    // Events from the torn-down generation-1 recognizer arrive late
    controller.handle_event(RecognitionEvent::Results {
        generation: 1,
        entries: vec![ResultEntry::finalized("stale")],
    });
    let fault = controller.handle_event(RecognitionEvent::Error {
        generation: 1,
        code: "aborted".to_string(),
    });
    controller.handle_event(RecognitionEvent::Ended { generation: 1 });

    assert_eq!(fault, None, "Stale errors must not surface");
    assert_eq!(controller.status(), RecognitionStatus::Listening);
    assert_eq!(controller.transcript().committed_text(), "");
}
