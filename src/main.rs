//! Resuma CLI entry point.

use anyhow::Result;
use clap::Parser;
use resuma::cli::{commands, Cli, Commands};
use resuma::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("resuma={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the audio artifact directory exists
    std::fs::create_dir_all(settings.audio_dir())?;

    // Execute command
    match &cli.command {
        Commands::Run {
            url,
            mode,
            temperature,
            model,
            save,
            html,
            show_transcript,
        } => {
            commands::run_process(
                url,
                mode,
                *temperature,
                model.clone(),
                *save,
                html.clone(),
                *show_transcript,
                settings,
            )
            .await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host.as_deref(), *port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
