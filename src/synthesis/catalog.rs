use crate::engine::VoiceDescriptor;
use tracing::{debug, info};

/// Cached voice catalog with a sticky selection.
///
/// The engine may report voices late and more than once, and some engines
/// redeliver the full list each time, so refreshes merge by voice name
/// rather than append. The first non-empty delivery auto-selects the first
/// voice, exactly once per catalog lifetime; a selection is never reassigned
/// by later deliveries.
#[derive(Debug, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
    selected: Option<String>,
    auto_selected: bool,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an engine delivery into the catalog (replace-by-name).
    pub fn merge(&mut self, incoming: Vec<VoiceDescriptor>) {
        for voice in incoming {
            match self.voices.iter_mut().find(|v| v.name == voice.name) {
                Some(existing) => *existing = voice,
                None => self.voices.push(voice),
            }
        }

        if !self.auto_selected && self.selected.is_none() {
            if let Some(first) = self.voices.first() {
                info!("Auto-selecting default voice: {}", first.name);
                self.selected = Some(first.name.clone());
                self.auto_selected = true;
            }
        }
    }

    /// Select a voice by name. Returns false if the catalog has no such
    /// voice, leaving the current selection untouched.
    pub fn select(&mut self, name: &str) -> bool {
        if self.voices.iter().any(|v| v.name == name) {
            self.selected = Some(name.to_string());
            true
        } else {
            debug!("Unknown voice: {}", name);
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The descriptor of the selected voice, if it resolves in the catalog.
    pub fn resolve(&self) -> Option<&VoiceDescriptor> {
        let name = self.selected.as_deref()?;
        self.voices.iter().find(|v| v.name == name)
    }

    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }
}
