//! Configuration module for Resuma.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ModePrompt, Prompts};
pub use settings::{
    ApiSettings, Credentials, GeneralSettings, GenerationSettings, PromptSettings,
    ServerSettings, Settings, TranscriptionSettings,
};
