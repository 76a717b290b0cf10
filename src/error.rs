//! Error types for the narrator

use std::io;
use thiserror::Error;

/// Shown when synthesis comes back without audio.
pub const NO_AUDIO_HINT: &str =
    "No audio was received. The selected voice may not support this language.";

#[derive(Error, Debug)]
pub enum NarratorError {
    #[error("Please enter some text to generate the audio.")]
    EmptyText,

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    #[error("Duplicate voice catalog entry: {0}")]
    DuplicateVoice(String),

    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Could not determine language")]
    Undetermined,

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, NarratorError>;

impl NarratorError {
    /// The single line shown to the user when an action fails.
    pub fn user_message(&self) -> String {
        match self {
            NarratorError::EmptyText => self.to_string(),
            NarratorError::Synthesis(_) | NarratorError::Network(_) => {
                let text = self.to_string();
                if text.to_lowercase().contains("no audio received") {
                    NO_AUDIO_HINT.to_string()
                } else {
                    format!("An error occurred: {}", text)
                }
            }
            other => format!("An error occurred: {}", other),
        }
    }
}
