use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use voiceflow::{
    Config, Intent, ResultEntry, ScriptedEngine, SpeechProvider, SpeechSession, VoiceDescriptor,
};

#[derive(Debug, Parser)]
#[command(name = "voiceflow", about = "Speech session controller demo")]
struct Args {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/voiceflow")]
    config: String,

    /// Override the default recognition language
    #[arg(long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(language) = args.language {
        cfg.session.default_language = language;
    }

    info!("VoiceFlow v0.1.0");
    info!("Default recognition language: {}", cfg.session.default_language);
    info!("{} recognition languages configured", cfg.languages.len());

    // Run a short scripted exchange through the coordinator so the state
    // machines can be observed without a live speech engine.
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(ScriptedEngine::new(events_tx));
    let provider: Arc<dyn SpeechProvider> = engine.clone();
    let mut session = SpeechSession::new(provider, &cfg.session);
    let snapshots = session.subscribe();

    engine.deliver_voices(vec![VoiceDescriptor {
        name: "Scripted Voice".to_string(),
        language: cfg.session.default_language.clone(),
    }]);

    session.apply(Intent::ToggleRecording).await;
    engine.emit_results(1, vec![ResultEntry::partial("hello")]);
    engine.emit_results(1, vec![ResultEntry::finalized("hello world")]);
    session.apply(Intent::ToggleRecording).await;
    engine.emit_recognition_ended(1);

    while let Ok(event) = events_rx.try_recv() {
        session.handle_engine_event(event).await;
    }

    let snapshot = snapshots.borrow().clone();
    info!(
        "Final snapshot:\n{}",
        serde_json::to_string_pretty(&snapshot)?
    );

    session.shutdown().await;
    Ok(())
}
