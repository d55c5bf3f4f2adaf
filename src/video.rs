//! YouTube URL validation.

use crate::error::{ResumaError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// A validated YouTube video URL.
///
/// Construction is the only validation point; the rest of the pipeline
/// accepts this type instead of raw strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrl(String);

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(https?://)?(www\.youtube\.com|youtu\.?be)/.+$").expect("Invalid regex")
    })
}

impl VideoUrl {
    /// Validate a URL string against the supported video platform pattern.
    ///
    /// Accepts `www.youtube.com` and `youtu.be` links, with an optional
    /// scheme. No side effects; rejection is terminal for the request.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if url_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ResumaError::InvalidUrl(input.to_string()))
        }
    }

    /// The validated URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_youtube_urls() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/abc123",
            "youtu.be/abc123",
        ] {
            assert!(VideoUrl::parse(url).is_ok(), "should accept {url}");
        }
    }

    #[test]
    fn test_rejects_other_urls() {
        for url in [
            "https://vimeo.com/abc123",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "not a url",
            "https://youtu.be/",
            "",
        ] {
            assert!(VideoUrl::parse(url).is_err(), "should reject {url}");
        }
    }

    #[test]
    fn test_rejection_is_invalid_url_error() {
        match VideoUrl::parse("https://vimeo.com/abc123") {
            Err(ResumaError::InvalidUrl(input)) => {
                assert_eq!(input, "https://vimeo.com/abc123");
            }
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }
}
