//! Text in, narration file out.
//!
//! The narrator owns the voice decision: it asks the detector about the text,
//! swaps in the Hindi voice when Hindi is found, and otherwise keeps what the
//! user picked. Synthesis failures are returned as-is; nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backends::{SpeechBackend, SynthesisRequest, Voice};
use crate::catalog::VoiceCatalog;
use crate::config_loader::Settings;
use crate::detect::{LanguageDetector, HINDI};
use crate::error::{NarratorError, Result};
use crate::rate::SpeechRate;

/// File name offered when the user saves into a directory.
pub const DOWNLOAD_FILE_NAME: &str = "narration.mp3";

pub const HINDI_DETECTED: &str = "Hindi text detected! Switching to the Hindi voice.";
pub const DETECTION_FAILED: &str =
    "Could not automatically detect language, using the selected voice.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// The voice a narration will actually use, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceDecision {
    pub voice_id: String,
    pub label: String,
    pub detected: Option<String>,
    pub notice: Option<Notice>,
}

/// A narration with its voice decided, not yet synthesized.
#[derive(Debug, Clone)]
pub struct NarrationPlan {
    pub text: String,
    pub path: PathBuf,
    pub decision: VoiceDecision,
}

#[derive(Debug, Clone)]
pub struct Narration {
    pub path: PathBuf,
    pub decision: VoiceDecision,
    pub bytes: usize,
}

pub struct Narrator {
    backend: Arc<dyn SpeechBackend>,
    detector: Arc<dyn LanguageDetector>,
    catalog: VoiceCatalog,
    language_override: bool,
    output_file: PathBuf,
    preview_file: PathBuf,
    preview_chars: usize,
}

impl Narrator {
    pub fn new(
        backend: Arc<dyn SpeechBackend>,
        detector: Arc<dyn LanguageDetector>,
        settings: &Settings,
    ) -> Self {
        let catalog = backend.catalog();
        Self {
            backend,
            detector,
            catalog,
            language_override: settings.language_override,
            output_file: PathBuf::from(&settings.output_file),
            preview_file: PathBuf::from(&settings.preview_file),
            preview_chars: settings.preview_chars,
        }
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn set_language_override(&mut self, enabled: bool) {
        self.language_override = enabled;
    }

    pub fn resolve_voice(&self, text: &str, selected: &Voice) -> VoiceDecision {
        let keep = |detected: Option<String>, notice: Option<Notice>| VoiceDecision {
            voice_id: selected.id.clone(),
            label: selected.name.clone(),
            detected,
            notice,
        };

        if !self.language_override {
            return keep(None, None);
        }

        match self.detector.detect(text) {
            Ok(code) if code == HINDI => {
                let voice_id = self.catalog.hindi_voice().to_string();
                let label = self
                    .catalog
                    .label_for(&voice_id)
                    .unwrap_or("Hindi")
                    .to_string();
                tracing::info!(from = %selected.id, to = %voice_id, "Hindi detected, overriding voice");
                VoiceDecision {
                    voice_id,
                    label,
                    detected: Some(code),
                    notice: Some(Notice::Info(HINDI_DETECTED.to_string())),
                }
            }
            Ok(code) => keep(Some(code), None),
            Err(e) => {
                tracing::warn!("Language detection failed: {}", e);
                keep(None, Some(Notice::Warning(DETECTION_FAILED.to_string())))
            }
        }
    }

    /// Full narration, written to the configured output file.
    pub async fn generate(&self, text: &str, label: &str, rate: SpeechRate) -> Result<Narration> {
        let plan = self.plan_generate(text, label)?;
        self.render(&plan, rate).await
    }

    /// Short sample from the start of the text, written to the preview file.
    pub async fn preview(&self, text: &str, label: &str, rate: SpeechRate) -> Result<Narration> {
        let plan = self.plan_preview(text, label)?;
        self.render(&plan, rate).await
    }

    /// Decides the voice for a full narration without synthesizing anything,
    /// so the decision's notice can be shown before the backend is called.
    pub fn plan_generate(&self, text: &str, label: &str) -> Result<NarrationPlan> {
        self.plan(text.trim(), label, &self.output_file)
    }

    pub fn plan_preview(&self, text: &str, label: &str) -> Result<NarrationPlan> {
        self.plan(preview_sample(text, self.preview_chars), label, &self.preview_file)
    }

    fn plan(&self, text: &str, label: &str, path: &Path) -> Result<NarrationPlan> {
        if text.is_empty() {
            return Err(NarratorError::EmptyText);
        }
        let selected = self.catalog.lookup(label)?;
        Ok(NarrationPlan {
            text: text.to_string(),
            path: path.to_path_buf(),
            decision: self.resolve_voice(text, selected),
        })
    }

    /// Synthesizes a plan and writes the audio. The file is left alone on failure.
    pub async fn render(&self, plan: &NarrationPlan, rate: SpeechRate) -> Result<Narration> {
        let request = SynthesisRequest {
            text: plan.text.clone(),
            voice_id: plan.decision.voice_id.clone(),
            rate,
        };
        tracing::info!(
            backend = self.backend.id(),
            voice = %request.voice_id,
            rate = %rate,
            chars = plan.text.chars().count(),
            "Generating audio"
        );
        let audio = self.backend.synthesize(&request).await?;

        tokio::fs::write(&plan.path, &audio).await?;
        tracing::info!(path = %plan.path.display(), bytes = audio.len(), "Audio written");

        Ok(Narration {
            path: plan.path.clone(),
            decision: plan.decision.clone(),
            bytes: audio.len(),
        })
    }
}

/// At most `max_chars` characters from the start of the trimmed text,
/// cut back to a word boundary when the text is longer.
pub fn preview_sample(text: &str, max_chars: usize) -> &str {
    let text = text.trim();
    let cut = match text.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return text,
    };
    let head = &text[..cut];
    if text[cut..].starts_with(char::is_whitespace) {
        return head.trim_end();
    }
    match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => head[..space].trim_end(),
        _ => head,
    }
}

/// Copies a finished narration to `dest`. A directory gets `DOWNLOAD_FILE_NAME`.
/// Saving a file onto itself leaves it untouched.
pub fn save_as(artifact: &Path, dest: &Path) -> Result<PathBuf> {
    let target = if dest.is_dir() {
        dest.join(DOWNLOAD_FILE_NAME)
    } else {
        dest.to_path_buf()
    };
    if target.exists() && std::fs::canonicalize(&target)? == std::fs::canonicalize(artifact)? {
        tracing::debug!(path = %target.display(), "Already saved");
        return Ok(target);
    }
    std::fs::copy(artifact, &target)?;
    Ok(target)
}
