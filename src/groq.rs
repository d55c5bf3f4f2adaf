//! Groq client configuration with sensible defaults.
//!
//! Groq exposes an OpenAI-compatible API, so the client is an
//! `async-openai` client pointed at the Groq base URL.

use crate::config::Credentials;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for Groq API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create a Groq client with configured timeout.
///
/// Uses a 5-minute timeout by default to prevent hung API calls. The
/// pipeline itself enforces no timeouts; they come from this client.
pub fn create_client(credentials: &Credentials) -> Client<OpenAIConfig> {
    create_client_with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a Groq client with a custom timeout.
pub fn create_client_with_timeout(
    credentials: &Credentials,
    timeout: Duration,
) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = OpenAIConfig::new()
        .with_api_base(&credentials.base_url)
        .with_api_key(&credentials.api_key);

    Client::with_config(config).with_http_client(http_client)
}
