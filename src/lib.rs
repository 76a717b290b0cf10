//! voice-narrator: turn English or Hindi text into a narrated MP3.
//!
//! Pick a voice from a [`catalog::VoiceCatalog`], hand text to a
//! [`narrator::Narrator`], and get back the path of the written file. When
//! Hindi is detected the narrator switches to the catalog's Hindi voice.

pub mod backends;
pub mod catalog;
pub mod config_loader;
pub mod detect;
pub mod engine;
pub mod error;
pub mod narrator;
pub mod rate;

pub use error::{NarratorError, Result};
