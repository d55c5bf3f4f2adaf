//! Sequential pipeline for Resuma.
//!
//! Coordinates one run: URL validation, audio extraction, transcription,
//! content generation, presentation. Strictly sequential; the first error
//! aborts the run and is surfaced to the caller. No retries.

use crate::audio::{AudioArtifact, Extractor, YtDlpExtractor};
use crate::config::{Credentials, Prompts, Settings};
use crate::error::Result;
use crate::generation::{ChatGenerator, GeneratedContent, Generator, Mode};
use crate::render::{self, RenderedOutput};
use crate::transcription::{Transcriber, Transcript, WhisperTranscriber};
use crate::video::VideoUrl;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// The result of one complete pipeline run.
pub struct PipelineRun {
    pub run_id: Uuid,
    pub artifact: AudioArtifact,
    pub transcript: Transcript,
    pub content: GeneratedContent,
    pub output: RenderedOutput,
}

/// The Resuma processing pipeline.
pub struct Pipeline {
    extractor: Arc<dyn Extractor>,
    transcriber: Arc<dyn Transcriber>,
    generator: Arc<dyn Generator>,
    audio_dir: PathBuf,
}

impl Pipeline {
    /// Create a pipeline from explicit settings and credentials.
    pub fn new(settings: &Settings, credentials: &Credentials) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        let extractor = Arc::new(YtDlpExtractor::new());
        let transcriber = Arc::new(WhisperTranscriber::new(
            credentials,
            &settings.transcription.model,
        ));
        let generator = Arc::new(ChatGenerator::new(
            credentials,
            &settings.generation,
            prompts,
        )?);

        Ok(Self::with_components(
            extractor,
            transcriber,
            generator,
            settings.audio_dir(),
        ))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        extractor: Arc<dyn Extractor>,
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<dyn Generator>,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            extractor,
            transcriber,
            generator,
            audio_dir,
        }
    }

    /// Run the full pipeline for one submission.
    #[instrument(skip(self), fields(input = %input, mode = %mode))]
    pub async fn run(&self, input: &str, mode: Mode) -> Result<PipelineRun> {
        let url = VideoUrl::parse(input)?;

        // Artifact path keyed by run id; passed explicitly through every
        // step so runs never collide on a shared path.
        let run_id = Uuid::new_v4();
        let dest = self.audio_dir.join(format!("audio-{run_id}.mp3"));

        info!("Extracting audio for run {}", run_id);
        let artifact = self.extractor.extract(&url, &dest).await?;

        info!("Transcribing {}", artifact.path.display());
        let transcript = self.transcriber.transcribe(&artifact.path).await?;

        info!("Generating {}", mode);
        let content = self.generator.generate(&transcript, mode).await?;

        let output = render::render(&content);

        Ok(PipelineRun {
            run_id,
            artifact,
            transcript,
            content,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumaError;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingExtractor;

    #[async_trait]
    impl Extractor for FailingExtractor {
        async fn extract(&self, _url: &VideoUrl, dest: &Path) -> Result<AudioArtifact> {
            // Simulates a download whose transcode produced no file.
            Err(ResumaError::ArtifactMissing(format!(
                "{} was not created",
                dest.display()
            )))
        }
    }

    struct StubExtractor {
        dir: PathBuf,
    }

    #[async_trait]
    impl Extractor for StubExtractor {
        async fn extract(&self, _url: &VideoUrl, _dest: &Path) -> Result<AudioArtifact> {
            let path = self.dir.join("audio.mp3");
            std::fs::write(&path, b"fake audio").unwrap();
            Ok(AudioArtifact {
                path,
                title: "Vídeo de teste".to_string(),
                duration_seconds: Some(42),
            })
        }
    }

    struct SpyTranscriber {
        calls: AtomicUsize,
        text: String,
    }

    impl SpyTranscriber {
        fn new(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                text: text.to_string(),
            }
        }
    }

    #[async_trait]
    impl Transcriber for SpyTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> Result<Transcript> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Transcript::new(self.text.clone()))
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl Generator for EchoGenerator {
        async fn generate(&self, transcript: &Transcript, mode: Mode) -> Result<GeneratedContent> {
            Ok(GeneratedContent {
                mode,
                text: transcript.text.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_missing_artifact_aborts_before_transcription() {
        let transcriber = Arc::new(SpyTranscriber::new("nunca usado"));
        let pipeline = Pipeline::with_components(
            Arc::new(FailingExtractor),
            transcriber.clone(),
            Arc::new(EchoGenerator),
            std::env::temp_dir(),
        );

        let result = pipeline
            .run("https://youtu.be/abc123", Mode::Summary)
            .await;

        match result {
            Err(ResumaError::ArtifactMissing(_)) => {}
            other => panic!("expected ArtifactMissing, got {:?}", other.map(|_| ())),
        }
        assert_eq!(transcriber.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_url_aborts_before_extraction() {
        let transcriber = Arc::new(SpyTranscriber::new("nunca usado"));
        let pipeline = Pipeline::with_components(
            Arc::new(FailingExtractor),
            transcriber.clone(),
            Arc::new(EchoGenerator),
            std::env::temp_dir(),
        );

        let result = pipeline.run("https://vimeo.com/abc123", Mode::Summary).await;

        assert!(matches!(result, Err(ResumaError::InvalidUrl(_))));
        assert_eq!(transcriber.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sequential_run_produces_rendered_output() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::with_components(
            Arc::new(StubExtractor {
                dir: dir.path().to_path_buf(),
            }),
            Arc::new(SpyTranscriber::new("Primeira ideia\nSegunda ideia")),
            Arc::new(EchoGenerator),
            dir.path().to_path_buf(),
        );

        let run = pipeline
            .run("https://youtu.be/abc123", Mode::Summary)
            .await
            .unwrap();

        assert_eq!(run.artifact.title, "Vídeo de teste");
        assert_eq!(run.content.text, "Primeira ideia\nSegunda ideia");
        match run.output {
            RenderedOutput::Summary(blocks) => assert_eq!(blocks.len(), 2),
            RenderedOutput::MindMap(_) => panic!("expected summary blocks"),
        }
    }

    #[tokio::test]
    async fn test_mind_map_content_flows_through_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let markdown = "# Tema\n## Tópico\n- Item";
        let pipeline = Pipeline::with_components(
            Arc::new(StubExtractor {
                dir: dir.path().to_path_buf(),
            }),
            Arc::new(SpyTranscriber::new(markdown)),
            Arc::new(EchoGenerator),
            dir.path().to_path_buf(),
        );

        let run = pipeline
            .run("https://youtu.be/abc123", Mode::MindMap)
            .await
            .unwrap();

        match run.output {
            RenderedOutput::MindMap(rendered) => assert_eq!(rendered, markdown),
            RenderedOutput::Summary(_) => panic!("expected mind map"),
        }
    }
}
