use lazy_static::lazy_static;
use regex::Regex;

use super::{BackendKind, SpeechBackend, SynthesisRequest};
use crate::catalog::VoiceCatalog;
use crate::config_loader::Settings;
use crate::error::{NarratorError, Result};

/// The translate endpoint refuses longer inputs.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Rates at or below this use the service's slow speed.
const SLOW_RATE_THRESHOLD: i32 = -50;

lazy_static! {
    // A run of text up to and including its closing punctuation.
    static ref SEGMENT: Regex = Regex::new(r"[^.!?।,;:\n]+[.!?।,;:\n]*").unwrap();
}

/// Google translate TTS. Voice identifiers are language codes (`en`, `hi`).
pub struct GoogleBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleBackend {
    pub fn new(settings: &Settings) -> Result<Self> {
        let endpoint = if settings.google_endpoint.is_empty() {
            format!("https://translate.google.{}/translate_tts", settings.google_tld)
        } else {
            settings.google_endpoint.clone()
        };

        Ok(Self {
            client: super::http_client(settings)?,
            endpoint,
        })
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn push_piece(chunks: &mut Vec<String>, current: &mut String, piece: &str) {
    if current.is_empty() {
        current.push_str(piece);
    } else if char_len(current) + 1 + char_len(piece) <= MAX_CHUNK_CHARS {
        current.push(' ');
        current.push_str(piece);
    } else {
        chunks.push(std::mem::take(current));
        current.push_str(piece);
    }
}

/// Splits text into pieces of at most `MAX_CHUNK_CHARS` characters,
/// preferring sentence punctuation, then whitespace, then a hard cut.
pub fn split_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for segment in SEGMENT.find_iter(text) {
        let segment = segment.as_str().trim();
        if segment.is_empty() {
            continue;
        }
        if char_len(segment) <= MAX_CHUNK_CHARS {
            push_piece(&mut chunks, &mut current, segment);
            continue;
        }
        for word in segment.split_whitespace() {
            if char_len(word) <= MAX_CHUNK_CHARS {
                push_piece(&mut chunks, &mut current, word);
                continue;
            }
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(MAX_CHUNK_CHARS) {
                let part: String = part.iter().collect();
                push_piece(&mut chunks, &mut current, &part);
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait::async_trait]
impl SpeechBackend for GoogleBackend {
    fn id(&self) -> &'static str {
        "google"
    }

    fn catalog(&self) -> VoiceCatalog {
        VoiceCatalog::builtin(BackendKind::Google)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        let chunks = split_text(&request.text);
        let speed = if request.rate.percent() <= SLOW_RATE_THRESHOLD {
            "0.24"
        } else {
            "1"
        };
        tracing::debug!(
            lang = %request.voice_id,
            chunks = chunks.len(),
            speed,
            "Google synthesis"
        );

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = char_len(chunk).to_string();
            let resp = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", request.voice_id.as_str()),
                    ("client", "tw-ob"),
                    ("ttsspeed", speed),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                return Err(NarratorError::Synthesis(format!(
                    "Google translate TTS returned {} for language {}",
                    status, request.voice_id
                )));
            }
            audio.extend_from_slice(&resp.bytes().await?);
        }

        if audio.is_empty() {
            return Err(NarratorError::Synthesis(format!(
                "No audio received for language {}",
                request.voice_id
            )));
        }
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_text("Hello world."), vec!["Hello world."]);
        assert!(split_text("   ").is_empty());
    }

    #[test]
    fn test_sentences_are_packed() {
        let sentence = "This sentence is exactly forty chars ok.";
        let text = format!("{} {} {}", sentence, sentence, sentence);
        let chunks = split_text(&text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{} {}", sentence, sentence));
        assert_eq!(chunks[1], sentence);
    }

    #[test]
    fn test_hindi_danda_splits() {
        let part = "यह एक बहुत लंबा हिंदी वाक्य है जो कई शब्दों से मिलकर बना है।";
        let text = format!("{} {}", part, part);
        let chunks = split_text(&text);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert!(chunks[0].ends_with('।'));
    }

    #[test]
    fn test_long_words_are_cut() {
        let word = "a".repeat(250);
        let chunks = split_text(&word);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(chunks.concat(), word);
    }

    #[test]
    fn test_long_sentence_splits_on_words() {
        let text = "word ".repeat(60);
        let chunks = split_text(&text);
        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert!(chunks.iter().all(|c| !c.starts_with(' ') && !c.ends_with(' ')));
    }
}
