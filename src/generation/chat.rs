//! Chat-completion content generation.

use super::{GeneratedContent, Generator, Mode};
use crate::config::{Credentials, GenerationSettings, Prompts};
use crate::error::{ResumaError, Result};
use crate::groq::create_client;
use crate::transcription::Transcript;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Generator backed by the Groq chat-completion endpoint.
pub struct ChatGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl ChatGenerator {
    /// Create a generator from validated settings.
    ///
    /// Model and temperature are checked here so a bad configuration fails
    /// before any pipeline work starts.
    pub fn new(
        credentials: &Credentials,
        settings: &GenerationSettings,
        prompts: Prompts,
    ) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            client: create_client(credentials),
            model: settings.model.clone(),
            temperature: settings.temperature,
            prompts,
        })
    }
}

#[async_trait]
impl Generator for ChatGenerator {
    #[instrument(skip(self, transcript), fields(mode = %mode))]
    async fn generate(&self, transcript: &Transcript, mode: Mode) -> Result<GeneratedContent> {
        if transcript.is_empty() {
            return Err(ResumaError::EmptyInput(
                "no transcript text to process".to_string(),
            ));
        }

        let prompt = self.prompts.for_mode(mode);

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.text.clone());
        vars.insert("mode".to_string(), mode.to_string());
        let user_prompt = Prompts::render(&prompt.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system.clone())
                .build()
                .map_err(|e| ResumaError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| ResumaError::Generation(e.to_string()))?
                .into(),
        ];

        debug!("Generating {} with {}", mode, self.model);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| ResumaError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ResumaError::Generation(format!("Chat API error: {}", e)))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| ResumaError::Generation("Empty response from model".to_string()))?
            .clone();

        // Returned unmodified; presentation happens downstream.
        Ok(GeneratedContent { mode, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_generator() -> ChatGenerator {
        let credentials = Credentials {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: "gsk_test".to_string(),
        };
        ChatGenerator::new(
            &credentials,
            &GenerationSettings::default(),
            Prompts::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_transcript_fails_before_remote_call() {
        let generator = test_generator();
        let transcript = Transcript::new("  \n".to_string());

        match generator.generate(&transcript, Mode::Summary).await {
            Err(ResumaError::EmptyInput(_)) => {}
            other => panic!("expected EmptyInput, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_settings_rejected_at_construction() {
        let credentials = Credentials {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: "gsk_test".to_string(),
        };
        let settings = GenerationSettings {
            model: "not-a-model".to_string(),
            temperature: 0.4,
        };
        assert!(ChatGenerator::new(&credentials, &settings, Prompts::default()).is_err());
    }
}
