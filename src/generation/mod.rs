//! Content generation module for Resuma.
//!
//! Turns a transcript into either a prose summary or a hierarchical
//! Markdown mind map via a chat-completion model.

mod chat;

pub use chat::ChatGenerator;

use crate::error::{ResumaError, Result};
use crate::transcription::Transcript;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Chat model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Fixed allow-list of selectable chat models.
pub const ALLOWED_MODELS: &[&str] = &[
    "llama-3.3-70b-versatile",
    "llama-3.3-70b-specdec",
    "llama-3.2-90b-vision-preview",
    "llama3-70b-8192",
    "mixtral-8x7b-32768",
    "gemma2-9b-it",
];

/// The closed set of output modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Summary,
    MindMap,
}

impl Mode {
    /// Filename of the downloadable artifact for this mode.
    pub fn download_filename(&self) -> &'static str {
        match self {
            Mode::Summary => "resumo.txt",
            Mode::MindMap => "mapa_mental.md",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Summary => write!(f, "Resumo"),
            Mode::MindMap => write!(f, "Mapa Mental"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = ResumaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "resumo" | "summary" => Ok(Mode::Summary),
            "mapa mental" | "mapa-mental" | "mapa_mental" | "mind map" | "mind-map"
            | "mindmap" => Ok(Mode::MindMap),
            _ => Err(ResumaError::InvalidMode(s.to_string())),
        }
    }
}

/// Generated text tagged with the mode that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub mode: Mode,
    /// Model output, unmodified.
    pub text: String,
}

/// Trait for content generation services.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate mode-specific content from a transcript.
    async fn generate(&self, transcript: &Transcript, mode: Mode) -> Result<GeneratedContent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_ui_names() {
        assert_eq!("Resumo".parse::<Mode>().unwrap(), Mode::Summary);
        assert_eq!("Mapa Mental".parse::<Mode>().unwrap(), Mode::MindMap);
        assert_eq!("mapa-mental".parse::<Mode>().unwrap(), Mode::MindMap);
        assert_eq!("summary".parse::<Mode>().unwrap(), Mode::Summary);
    }

    #[test]
    fn test_unknown_mode_is_invalid_mode_error() {
        match "Selecione...".parse::<Mode>() {
            Err(ResumaError::InvalidMode(s)) => assert_eq!(s, "Selecione..."),
            other => panic!("expected InvalidMode, got {other:?}"),
        }
    }

    #[test]
    fn test_mode_display_matches_ui() {
        assert_eq!(Mode::Summary.to_string(), "Resumo");
        assert_eq!(Mode::MindMap.to_string(), "Mapa Mental");
    }

    #[test]
    fn test_download_filenames() {
        assert_eq!(Mode::Summary.download_filename(), "resumo.txt");
        assert_eq!(Mode::MindMap.download_filename(), "mapa_mental.md");
    }

    #[test]
    fn test_default_model_is_allowed() {
        assert!(ALLOWED_MODELS.contains(&DEFAULT_MODEL));
    }
}
