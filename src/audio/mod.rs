//! Audio extraction via yt-dlp.
//!
//! Resolves video metadata without downloading, then downloads and
//! transcodes the audio track to MP3 inside a scoped temporary directory
//! and relocates the result to a per-run destination path.

use crate::error::{ResumaError, Result};
use crate::video::VideoUrl;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Placeholder shown when the upstream service omits the video title.
pub const UNKNOWN_TITLE: &str = "Título não disponível";

/// Placeholder shown when the upstream service omits the duration.
pub const UNKNOWN_DURATION: &str = "Duração não disponível";

/// File stem used for the in-flight download inside the temp directory.
const DOWNLOAD_STEM: &str = "downloaded_audio";

/// The audio file produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Final location of the MP3 file.
    pub path: PathBuf,
    /// Video title, or [`UNKNOWN_TITLE`] when unavailable.
    pub title: String,
    /// Duration in seconds. `None` when the upstream service omits it.
    pub duration_seconds: Option<u32>,
}

impl AudioArtifact {
    /// Human-readable duration, with the placeholder for unknown values.
    pub fn duration_display(&self) -> String {
        match self.duration_seconds {
            Some(secs) => format!("{} segundos", secs),
            None => UNKNOWN_DURATION.to_string(),
        }
    }
}

/// Trait for audio extraction backends.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract the audio track of `url` to `dest`, overwriting any file
    /// already at that path.
    async fn extract(&self, url: &VideoUrl, dest: &Path) -> Result<AudioArtifact>;
}

/// yt-dlp based extractor producing MP3 at 192 kbps.
pub struct YtDlpExtractor;

impl YtDlpExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Fetch title and duration without downloading.
    async fn fetch_metadata(&self, url: &VideoUrl) -> Result<(String, Option<u32>)> {
        let output = Command::new("yt-dlp")
            .args(["--dump-json", "--no-download", "--no-warnings", url.as_str()])
            .output()
            .await
            .map_err(map_spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResumaError::Extraction(format!(
                "yt-dlp metadata resolution failed: {}",
                stderr.trim()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str).map_err(|e| {
            ResumaError::Extraction(format!("Failed to parse yt-dlp output: {}", e))
        })?;

        let title = json["title"]
            .as_str()
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();

        let duration = json["duration"].as_f64().map(|d| d as u32);

        Ok((title, duration))
    }

    /// Download and transcode the audio track into `dir`.
    async fn download_audio(&self, url: &VideoUrl, dir: &Path) -> Result<PathBuf> {
        let template = dir.join(format!("{}.%(ext)s", DOWNLOAD_STEM));

        let output = Command::new("yt-dlp")
            .arg("--extract-audio")
            .arg("--audio-format").arg("mp3")
            .arg("--audio-quality").arg("192K")
            .arg("--output").arg(template.to_str().unwrap_or_default())
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(url.as_str())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(map_spawn_error)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResumaError::Extraction(format!(
                "yt-dlp failed: {}",
                stderr.trim()
            )));
        }

        locate_output(dir)
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    #[instrument(skip(self, dest), fields(url = %url))]
    async fn extract(&self, url: &VideoUrl, dest: &Path) -> Result<AudioArtifact> {
        let (title, duration_seconds) = self.fetch_metadata(url).await?;
        debug!("Resolved metadata: {}", title);

        // Scoped temp dir; deleted on drop even when the download fails.
        let temp_dir = tempfile::tempdir()?;

        info!("Downloading audio from {}", url);
        let downloaded = self.download_audio(url, temp_dir.path()).await?;

        persist_artifact(&downloaded, dest)?;
        debug!("Audio artifact at {}", dest.display());

        Ok(AudioArtifact {
            path: dest.to_path_buf(),
            title,
            duration_seconds,
        })
    }
}

/// Map a process-spawn error to the right taxonomy variant.
fn map_spawn_error(e: std::io::Error) -> ResumaError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ResumaError::ToolNotFound("yt-dlp".into())
    } else {
        ResumaError::Extraction(format!("yt-dlp execution failed: {e}"))
    }
}

/// Locate the transcoded MP3 after a successful yt-dlp exit.
///
/// Transcoding can fail silently; a missing file here is an artifact error,
/// not a tool error.
fn locate_output(dir: &Path) -> Result<PathBuf> {
    let expected = dir.join(format!("{}.mp3", DOWNLOAD_STEM));
    if expected.exists() {
        Ok(expected)
    } else {
        Err(ResumaError::ArtifactMissing(format!(
            "{} was not created",
            expected.display()
        )))
    }
}

/// Move the downloaded file to its permanent location, overwriting any
/// previous file there. Falls back to copy+remove for cross-device moves.
fn persist_artifact(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match std::fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            std::fs::copy(source, dest)?;
            std::fs::remove_file(source)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_output_missing_is_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        match locate_output(dir.path()) {
            Err(ResumaError::ArtifactMissing(_)) => {}
            other => panic!("expected ArtifactMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_locate_output_finds_mp3() {
        let dir = tempfile::tempdir().unwrap();
        let mp3 = dir.path().join("downloaded_audio.mp3");
        std::fs::write(&mp3, b"fake audio").unwrap();
        assert_eq!(locate_output(dir.path()).unwrap(), mp3);
    }

    #[test]
    fn test_persist_artifact_overwrites_dest() {
        let src_dir = tempfile::tempdir().unwrap();
        let dest_dir = tempfile::tempdir().unwrap();

        let source = src_dir.path().join("downloaded_audio.mp3");
        let dest = dest_dir.path().join("audio.mp3");
        std::fs::write(&source, b"new").unwrap();
        std::fs::write(&dest, b"old").unwrap();

        persist_artifact(&source, &dest).unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn test_duration_display_placeholder() {
        let artifact = AudioArtifact {
            path: PathBuf::from("audio.mp3"),
            title: UNKNOWN_TITLE.to_string(),
            duration_seconds: None,
        };
        assert_eq!(artifact.duration_display(), UNKNOWN_DURATION);

        let artifact = AudioArtifact {
            duration_seconds: Some(212),
            ..artifact
        };
        assert_eq!(artifact.duration_display(), "212 segundos");
    }
}
