//! Resuma - YouTube videos into summaries and mind maps
//!
//! A small web UI and CLI that turns a YouTube link into a transcript and
//! then into either a structured prose summary or a hierarchical Markdown
//! mind map.
//!
//! The name "Resuma" is the Portuguese imperative of "resumir" — summarize.
//!
//! # Overview
//!
//! Resuma allows you to:
//! - Download the audio track of a YouTube video
//! - Transcribe it with Whisper via the Groq API
//! - Generate a summary ("Resumo") or a Markdown mind map ("Mapa Mental")
//! - Render the result as color-cycled prose blocks or a markmap diagram
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `video` - YouTube URL validation
//! - `audio` - Audio extraction via yt-dlp
//! - `transcription` - Speech-to-text via the Groq Whisper endpoint
//! - `generation` - Summary / mind-map generation via chat completion
//! - `render` - Presentation formatting (palette cycling, markmap)
//! - `pipeline` - Sequential pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use resuma::config::Settings;
//! use resuma::generation::Mode;
//! use resuma::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = settings.credentials()?;
//!     let pipeline = Pipeline::new(&settings, &credentials)?;
//!
//!     let run = pipeline
//!         .run("https://youtu.be/dQw4w9WgXcQ", Mode::Summary)
//!         .await?;
//!     println!("{}", run.content.text);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod groq;
pub mod pipeline;
pub mod render;
pub mod transcription;
pub mod video;

pub use error::{Result, ResumaError};
