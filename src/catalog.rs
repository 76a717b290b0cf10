//! Voice menus: display label to voice identifier, in menu order.

use crate::backends::{BackendKind, Voice};
use crate::error::{NarratorError, Result};

const AZURE_VOICES: &[(&str, &str, &str)] = &[
    ("English (US) - Aria (Female)", "en-US-AriaNeural", "en"),
    ("English (US) - Guy (Male)", "en-US-GuyNeural", "en"),
    ("English (UK) - Sonia (Female)", "en-GB-SoniaNeural", "en"),
    ("English (India) - Neerja (Female)", "en-IN-NeerjaNeural", "en"),
    ("Hindi - Swara (Female)", "hi-IN-SwaraNeural", "hi"),
    ("Hindi - Madhur (Male)", "hi-IN-MadhurNeural", "hi"),
];

const GOOGLE_VOICES: &[(&str, &str, &str)] = &[("English", "en", "en"), ("Hindi", "hi", "hi")];

#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    entries: Vec<Voice>,
    hindi_voice: String,
}

impl VoiceCatalog {
    pub fn builtin(kind: BackendKind) -> Self {
        let (table, hindi_voice) = match kind {
            BackendKind::Azure => (AZURE_VOICES, "hi-IN-SwaraNeural"),
            BackendKind::Google => (GOOGLE_VOICES, "hi"),
        };
        let entries = table
            .iter()
            .map(|(name, id, language)| Voice {
                id: id.to_string(),
                name: name.to_string(),
                language: language.to_string(),
            })
            .collect();
        Self {
            entries,
            hindi_voice: hindi_voice.to_string(),
        }
    }

    /// Builds a catalog from explicit entries. Labels and identifiers must be unique.
    pub fn from_entries(entries: Vec<Voice>, hindi_voice: &str) -> Result<Self> {
        for (i, voice) in entries.iter().enumerate() {
            if entries[..i].iter().any(|v| v.name == voice.name) {
                return Err(NarratorError::DuplicateVoice(voice.name.clone()));
            }
            if entries[..i].iter().any(|v| v.id == voice.id) {
                return Err(NarratorError::DuplicateVoice(voice.id.clone()));
            }
        }
        Ok(Self {
            entries,
            hindi_voice: hindi_voice.to_string(),
        })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn lookup(&self, label: &str) -> Result<&Voice> {
        self.entries
            .iter()
            .find(|v| v.name == label)
            .ok_or_else(|| NarratorError::UnknownVoice(label.to_string()))
    }

    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.name.as_str())
    }

    /// First menu entry; the form's initial selection.
    pub fn default_entry(&self) -> Option<&Voice> {
        self.entries.first()
    }

    /// Voice substituted when Hindi text is detected.
    pub fn hindi_voice(&self) -> &str {
        &self.hindi_voice
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
