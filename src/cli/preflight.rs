//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available before
//! starting a pipeline run that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{ResumaError, Result};
use std::process::Command;

/// Run pre-flight checks for a pipeline run.
///
/// Returns Ok(()) if all checks pass, or an error describing what's
/// missing. The credential check runs first so a configuration error is
/// surfaced before any processing is attempted.
pub fn check_processing(settings: &Settings) -> Result<()> {
    settings.credentials()?;
    check_tool("yt-dlp")?;
    check_tool("ffmpeg")?;
    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    // ffmpeg uses -version (single dash), others use --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(ResumaError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ResumaError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(ResumaError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiSettings;

    #[test]
    fn test_missing_credential_fails_first() {
        let settings = Settings {
            api: ApiSettings {
                key_env: "RESUMA_TEST_UNSET_KEY".to_string(),
                ..ApiSettings::default()
            },
            ..Settings::default()
        };
        match check_processing(&settings) {
            Err(ResumaError::Config(msg)) => assert!(msg.contains("RESUMA_TEST_UNSET_KEY")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
