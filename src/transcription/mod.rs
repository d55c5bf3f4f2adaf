//! Transcription module for Resuma.
//!
//! Sends audio bytes to the Groq Whisper endpoint and returns the full
//! transcript text in one synchronous call. No streaming, no chunking.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A plain-text transcript, verbatim from the transcription service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
}

impl Transcript {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// True when the transcript carries no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return its full text.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_emptiness() {
        assert!(Transcript::new(String::new()).is_empty());
        assert!(Transcript::new("   \n ".to_string()).is_empty());
        assert!(!Transcript::new("olá".to_string()).is_empty());
    }
}
