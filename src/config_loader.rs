use config::{Config, File};
use serde::Deserialize;

use crate::rate::SpeechRate;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tts_backend: String, // "google" or "azure"
    // Azure neural voices
    pub azure_region: String,
    pub azure_key: String,
    pub azure_endpoint: String, // empty = derived from region
    pub azure_output_format: String,
    // Google translate voices
    pub google_tld: String,
    pub google_endpoint: String, // empty = derived from tld
    // Form defaults
    pub default_voice: String, // empty = first catalog entry
    pub default_rate: i32,
    pub language_override: bool,
    // Artifacts
    pub output_file: String,
    pub preview_file: String,
    pub preview_chars: usize,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tts_backend: "google".to_string(),
            azure_region: "eastus".to_string(),
            azure_key: String::new(),
            azure_endpoint: String::new(),
            azure_output_format: "audio-24khz-48kbitrate-mono-mp3".to_string(),
            google_tld: "com".to_string(),
            google_endpoint: String::new(),
            default_voice: String::new(),
            default_rate: 0,
            language_override: true,
            output_file: "final_narration.mp3".to_string(),
            preview_file: "preview.mp3".to_string(),
            preview_chars: 150,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Loads and validates every configuration layer.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = Self::load()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merges the layers without validating, for callers that still apply
    /// command-line overrides before calling `validate`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default("tts_backend", defaults.tts_backend)?
            .set_default("azure_region", defaults.azure_region)?
            .set_default("azure_key", defaults.azure_key)?
            .set_default("azure_endpoint", defaults.azure_endpoint)?
            .set_default("azure_output_format", defaults.azure_output_format)?
            .set_default("google_tld", defaults.google_tld)?
            .set_default("google_endpoint", defaults.google_endpoint)?
            .set_default("default_voice", defaults.default_voice)?
            .set_default("default_rate", defaults.default_rate as i64)?
            .set_default("language_override", defaults.language_override)?
            .set_default("output_file", defaults.output_file)?
            .set_default("preview_file", defaults.preview_file)?
            .set_default("preview_chars", defaults.preview_chars as u64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            // Merge with local config file (if exists)
            .add_source(File::with_name("Narrator").required(false))
            .add_source(
                File::with_name(&format!(
                    "{}/voice-narrator/Narrator",
                    dirs::config_dir()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                ))
                .required(false),
            )
            // Merge with environment variables (e.g. NARRATOR_TTS_BACKEND)
            .add_source(config::Environment::with_prefix("NARRATOR"));

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        match self.tts_backend.as_str() {
            "google" => {}
            "azure" => {
                if self.azure_key.is_empty() {
                    return Err(config::ConfigError::Message(
                        "azure_key must be set when tts_backend is azure".to_string(),
                    ));
                }
            }
            other => {
                return Err(config::ConfigError::Message(format!(
                    "Invalid tts_backend: {}. Must be google or azure",
                    other
                )));
            }
        }
        if let Err(e) = SpeechRate::new(self.default_rate) {
            return Err(config::ConfigError::Message(format!(
                "Invalid default_rate: {}",
                e
            )));
        }
        if self.preview_chars == 0 {
            return Err(config::ConfigError::Message(
                "preview_chars must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
