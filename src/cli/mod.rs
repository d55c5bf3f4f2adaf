//! CLI module for Resuma.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Resuma - YouTube videos into summaries and mind maps
///
/// Downloads the audio of a YouTube video, transcribes it, and generates a
/// structured summary or a Markdown mind map.
/// The name "Resuma" is the Portuguese imperative of "resumir" — summarize.
#[derive(Parser, Debug)]
#[command(name = "resuma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a YouTube video into a summary or mind map
    Run {
        /// YouTube video URL
        url: String,

        /// Output mode: resumo or mapa-mental
        #[arg(short, long, default_value = "resumo")]
        mode: String,

        /// Creativity of the model (0.0-1.0)
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Chat model to use (from the fixed allow-list)
        #[arg(long)]
        model: Option<String>,

        /// Write the result to the mode's download file
        /// (resumo.txt or mapa_mental.md)
        #[arg(short, long)]
        save: bool,

        /// Write a rendered HTML document to this path
        #[arg(long)]
        html: Option<String>,

        /// Print the full transcript as well
        #[arg(long)]
        show_transcript: bool,
    },

    /// Start the web UI
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
