use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{NarratorError, Result};

/// Plays finished narrations on the default output device.
pub struct AudioEngine;

impl AudioEngine {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until the file has played to the end.
    pub fn play_file(&self, path: &Path) -> Result<()> {
        let file = File::open(path)?;

        // The stream must outlive the sink
        let (_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| NarratorError::Playback(format!("No audio output device found: {}", e)))?;
        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| NarratorError::Playback(format!("Failed to create sink: {}", e)))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| NarratorError::Playback(format!("Failed to decode: {}", e)))?;

        tracing::debug!(path = %path.display(), "Playing audio");
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
