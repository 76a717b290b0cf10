//! Speaking rate, as a signed percentage relative to the voice's normal speed.

use std::fmt;
use std::str::FromStr;

use crate::error::{NarratorError, Result};

pub const MIN_RATE: i32 = -100;
pub const MAX_RATE: i32 = 100;
pub const RATE_STEP: i32 = 5;

/// A rate in `MIN_RATE..=MAX_RATE`, always a multiple of `RATE_STEP`.
///
/// Displays the way synthesis services expect it: `+0%`, `+25%`, `-50%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeechRate(i32);

impl SpeechRate {
    pub fn new(percent: i32) -> Result<Self> {
        if !(MIN_RATE..=MAX_RATE).contains(&percent) {
            return Err(NarratorError::InvalidRate(format!(
                "{} is outside {}..{}",
                percent, MIN_RATE, MAX_RATE
            )));
        }
        if percent % RATE_STEP != 0 {
            return Err(NarratorError::InvalidRate(format!(
                "{} is not a multiple of {}",
                percent, RATE_STEP
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}%", self.0)
    }
}

impl FromStr for SpeechRate {
    type Err = NarratorError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let percent: i32 = number
            .parse()
            .map_err(|_| NarratorError::InvalidRate(format!("not a percentage: {:?}", s)))?;
        Self::new(percent)
    }
}
