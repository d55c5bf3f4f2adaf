//! Run command implementation - one full pipeline run from the terminal.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::generation::Mode;
use crate::pipeline::Pipeline;
use crate::render;
use anyhow::Result;

/// Run the pipeline for a single URL and print the result.
pub async fn run_process(
    url: &str,
    mode: &str,
    temperature: Option<f32>,
    model: Option<String>,
    save: bool,
    html: Option<String>,
    show_transcript: bool,
    mut settings: Settings,
) -> Result<()> {
    let mode: Mode = mode.parse()?;

    // CLI overrides become part of the explicit configuration before the
    // pipeline is built.
    if let Some(temperature) = temperature {
        settings.generation.temperature = temperature;
    }
    if let Some(model) = model {
        settings.generation.model = model;
    }
    settings.generation.validate()?;

    preflight::check_processing(&settings)?;
    let credentials = settings.credentials()?;
    let pipeline = Pipeline::new(&settings, &credentials)?;

    let spinner = Output::spinner("Processing video (download, transcription, generation)...");
    let result = pipeline.run(url, mode).await;
    // Progress is cleared on success and failure alike.
    spinner.finish_and_clear();

    let run = match result {
        Ok(run) => run,
        Err(e) => {
            Output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    Output::kv("Título", &run.artifact.title);
    Output::kv("Duração", &run.artifact.duration_display());
    Output::kv("Áudio", &run.artifact.path.display().to_string());

    if show_transcript {
        Output::header("Transcrição");
        println!("{}", run.transcript.text);
    }

    Output::header(&mode.to_string());
    println!("{}", run.content.text);

    if save {
        // The download file carries the generated text byte-for-byte.
        let filename = mode.download_filename();
        std::fs::write(filename, &run.content.text)?;
        Output::success(&format!("Saved {}", filename));
    }

    if let Some(path) = html {
        std::fs::write(&path, render::to_html(&run.content))?;
        Output::success(&format!("Saved rendered HTML to {}", path));
    }

    Ok(())
}
