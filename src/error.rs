//! Error types for Resuma.

use thiserror::Error;

/// Library-level error type for Resuma operations.
///
/// Every variant is terminal for the current request; nothing is retried
/// automatically. Callers surface the message and stop.
#[derive(Error, Debug)]
pub enum ResumaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("Audio extraction failed: {0}")]
    Extraction(String),

    #[error("Audio artifact missing after download: {0}")]
    ArtifactMissing(String),

    #[error("Audio file not found: {0}")]
    MissingAudio(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Invalid output mode: {0}")]
    InvalidMode(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Content generation failed: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for Resuma operations.
pub type Result<T> = std::result::Result<T, ResumaError>;
