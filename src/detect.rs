//! Language identification.
//!
//! The narrator only needs a two-letter code, or to know that no guess could
//! be made. `WhatlangDetector` is the default; tests substitute their own.

use whatlang::{Lang, Script};

use crate::error::{NarratorError, Result};

pub const HINDI: &str = "hi";
pub const ENGLISH: &str = "en";

#[cfg_attr(test, mockall::automock)]
pub trait LanguageDetector: Send + Sync {
    /// Two-letter code of the text's language, or `NarratorError::Undetermined`.
    fn detect(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

fn two_letter(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => ENGLISH,
        Lang::Hin => HINDI,
        Lang::Ben => "bn",
        Lang::Urd => "ur",
        Lang::Pan => "pa",
        Lang::Guj => "gu",
        Lang::Tam => "ta",
        Lang::Tel => "te",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Spa => "es",
        other => other.code(),
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String> {
        if !text.chars().any(char::is_alphabetic) {
            return Err(NarratorError::Undetermined);
        }
        // Devanagari is read as Hindi; the trigram guess splits short Hindi
        // phrases between Hindi, Marathi and Nepali.
        if whatlang::detect_script(text) == Some(Script::Devanagari) {
            tracing::debug!("Devanagari script, treating as Hindi");
            return Ok(HINDI.to_string());
        }
        let info = whatlang::detect(text).ok_or(NarratorError::Undetermined)?;
        tracing::debug!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            "Detected language"
        );
        Ok(two_letter(info.lang()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_hindi() {
        let text = "मैं आज बाजार जा रहा हूँ क्योंकि मुझे घर के लिए सब्जियाँ और फल खरीदने हैं। \
                    मेरी माँ ने कहा है कि शाम तक वापस आ जाना।";
        assert_eq!(WhatlangDetector::new().detect(text).unwrap(), HINDI);
    }

    #[test]
    fn test_short_hindi_phrases() {
        let detector = WhatlangDetector::new();
        for text in ["मुझे पानी चाहिए", "धन्यवाद", "नमस्ते"] {
            assert_eq!(detector.detect(text).unwrap(), HINDI, "{}", text);
        }
    }

    #[test]
    fn test_detects_english() {
        let text = "The quick brown fox jumps over the lazy dog while the children \
                    are playing in the garden behind the old house.";
        assert_eq!(WhatlangDetector::new().detect(text).unwrap(), ENGLISH);
    }

    #[test]
    fn test_undetermined_without_letters() {
        let detector = WhatlangDetector::new();
        assert!(matches!(detector.detect(""), Err(NarratorError::Undetermined)));
        assert!(matches!(
            detector.detect("12345 !!! ???"),
            Err(NarratorError::Undetermined)
        ));
    }
}
