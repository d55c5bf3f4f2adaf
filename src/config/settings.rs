//! Configuration settings for Resuma.

use crate::error::{ResumaError, Result};
use crate::generation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub api: ApiSettings,
    pub transcription: TranscriptionSettings,
    pub generation: GenerationSettings,
    pub server: ServerSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where per-run audio artifacts are written.
    pub audio_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            audio_dir: ".".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Remote API settings (Groq, OpenAI-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub key_env: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

/// Transcription service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Whisper model to use.
    pub model: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: "whisper-large-v3-turbo".to_string(),
        }
    }
}

/// Content generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat model to use. Must be one of [`generation::ALLOWED_MODELS`].
    pub model: String,
    /// Creativity parameter passed to the model (0.0-1.0).
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: generation::DEFAULT_MODEL.to_string(),
            temperature: 0.4,
        }
    }
}

impl GenerationSettings {
    /// Validate model and temperature against their fixed bounds.
    pub fn validate(&self) -> Result<()> {
        if !generation::ALLOWED_MODELS.contains(&self.model.as_str()) {
            return Err(ResumaError::Config(format!(
                "Unknown model '{}'. Allowed models: {}",
                self.model,
                generation::ALLOWED_MODELS.join(", ")
            )));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ResumaError::Config(format!(
                "Temperature {} out of range (expected 0.0-1.0)",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

/// Resolved API credentials, passed explicitly into each remote client.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub base_url: String,
    pub api_key: String,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("resuma")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded audio artifact directory path.
    pub fn audio_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.audio_dir)
    }

    /// Resolve the API credentials from the environment.
    ///
    /// A missing or empty key is a configuration error surfaced to the user
    /// before any processing starts.
    pub fn credentials(&self) -> Result<Credentials> {
        match std::env::var(&self.api.key_env) {
            Ok(key) if !key.is_empty() => Ok(Credentials {
                base_url: self.api.base_url.clone(),
                api_key: key,
            }),
            Ok(_) => Err(ResumaError::Config(format!(
                "{} is empty. Set it with: export {}='gsk_...'",
                self.api.key_env, self.api.key_env
            ))),
            Err(_) => Err(ResumaError::Config(format!(
                "{} not set. Set it with: export {}='gsk_...'",
                self.api.key_env, self.api.key_env
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.generation.validate().is_ok());
        assert_eq!(settings.generation.temperature, 0.4);
        assert_eq!(settings.transcription.model, "whisper-large-v3-turbo");
    }

    #[test]
    fn test_defaults_roundtrip_toml() {
        let settings = Settings::default();
        let content = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&content).unwrap();
        assert_eq!(parsed.generation.model, settings.generation.model);
        assert_eq!(parsed.server.port, settings.server.port);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let generation = GenerationSettings {
            model: "gpt-999".to_string(),
            temperature: 0.4,
        };
        assert!(generation.validate().is_err());
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let generation = GenerationSettings {
            temperature: 1.5,
            ..GenerationSettings::default()
        };
        assert!(generation.validate().is_err());
    }
}
