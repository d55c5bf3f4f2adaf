//! Groq Whisper transcription implementation.

use super::{Transcriber, Transcript};
use crate::config::Credentials;
use crate::error::{ResumaError, Result};
use crate::groq::create_client;
use async_openai::types::CreateTranscriptionRequestArgs;
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

/// Whisper-based transcriber backed by the Groq audio endpoint.
pub struct WhisperTranscriber {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl WhisperTranscriber {
    /// Create a transcriber for the given credentials and model id.
    pub fn new(credentials: &Credentials, model: &str) -> Self {
        Self {
            client: create_client(credentials),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
        let metadata = tokio::fs::metadata(audio_path).await.map_err(|_| {
            ResumaError::MissingAudio(audio_path.display().to_string())
        })?;

        if metadata.len() == 0 {
            return Err(ResumaError::MissingAudio(format!(
                "{} is empty",
                audio_path.display()
            )));
        }

        debug!("Transcribing audio file with {}", self.model);

        let file_bytes = tokio::fs::read(audio_path).await?;

        let request = CreateTranscriptionRequestArgs::default()
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.mp3")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .build()
            .map_err(|e| ResumaError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe(request)
            .await
            .map_err(|e| ResumaError::Transcription(format!("Whisper API error: {}", e)))?;

        // Returned verbatim; no post-processing or normalization.
        Ok(Transcript::new(response.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;

    fn test_credentials() -> Credentials {
        Credentials {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: "gsk_test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_missing_audio_error() {
        let transcriber = WhisperTranscriber::new(&test_credentials(), "whisper-large-v3-turbo");
        let result = transcriber
            .transcribe(Path::new("/nonexistent/audio.mp3"))
            .await;
        match result {
            Err(ResumaError::MissingAudio(_)) => {}
            other => panic!("expected MissingAudio, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_file_is_missing_audio_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.mp3");
        std::fs::write(&path, b"").unwrap();

        let transcriber = WhisperTranscriber::new(&test_credentials(), "whisper-large-v3-turbo");
        match transcriber.transcribe(&path).await {
            Err(ResumaError::MissingAudio(msg)) => assert!(msg.contains("empty")),
            other => panic!("expected MissingAudio, got {other:?}"),
        }
    }
}
