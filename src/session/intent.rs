/// User intents forwarded by the presentation layer.
///
/// Presentation is expected to disable controls that do not apply to the
/// current state, but the coordinator re-validates every intent anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start recognition if idle, stop it otherwise.
    ToggleRecording,
    /// Clear the accumulated transcript.
    ClearTranscript,
    /// Rebind recognition to a new BCP-47 language tag.
    SetLanguage(String),
    /// Stage the text to speak.
    SetText(String),
    /// Speak the staged text.
    Speak,
    /// Cancel the active utterance.
    StopSpeaking,
    /// Select a synthesis voice by name.
    SelectVoice(String),
    /// Clear the staged text.
    ClearText,
}
