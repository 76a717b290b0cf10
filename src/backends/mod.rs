pub mod azure;
pub mod google;

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::VoiceCatalog;
use crate::config_loader::Settings;
use crate::error::{NarratorError, Result};
use crate::rate::SpeechRate;

/// Represents a text-to-speech voice
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Azure,
    Google,
}

impl BackendKind {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "azure" => Ok(BackendKind::Azure),
            "google" => Ok(BackendKind::Google),
            other => Err(NarratorError::Config(config::ConfigError::Message(format!(
                "Invalid tts_backend: {}. Must be google or azure",
                other
            )))),
        }
    }
}

/// Everything a backend needs for one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub rate: SpeechRate,
}

/// Trait that all speech synthesis backends must implement.
/// Backends only ever see finished requests; voice selection happens upstream.
#[async_trait::async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Returns the encoded audio (MP3) for the request
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>>;

    /// Returns the unique ID of the backend (e.g., "azure")
    fn id(&self) -> &'static str;

    /// Returns the voices offered for this backend
    fn catalog(&self) -> VoiceCatalog;
}

pub(crate) fn http_client(settings: &Settings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(concat!("voice-narrator/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub fn create_backend(settings: &Settings) -> Result<Arc<dyn SpeechBackend>> {
    let backend: Arc<dyn SpeechBackend> = match BackendKind::from_name(&settings.tts_backend)? {
        BackendKind::Azure => Arc::new(azure::AzureBackend::new(settings)?),
        BackendKind::Google => Arc::new(google::GoogleBackend::new(settings)?),
    };
    tracing::debug!(backend = backend.id(), "Created speech backend");
    Ok(backend)
}
