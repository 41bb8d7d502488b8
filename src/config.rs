//! Configuration
//!
//! Settings come from environment variables with sensible defaults; every
//! struct can also be built directly for tests.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default provider endpoint.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default image model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default request timeout (2 minutes).
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Default pointer hit radius for resize handles, in pixels.
pub const DEFAULT_HANDLE_RADIUS: f64 = 6.0;

/// How pointer-move updates are recorded in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitMode {
    /// Every pointer-move becomes its own undo step.
    Move,
    /// Moves are previewed and one undo step is recorded at pointer-up.
    #[default]
    Gesture,
}

impl FromStr for CommitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "move" | "per-move" => Ok(Self::Move),
            "gesture" | "per-gesture" => Ok(Self::Gesture),
            other => Err(format!("unknown commit mode '{}'", other)),
        }
    }
}

/// Connection settings for the image-generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProviderConfig {
    /// Read `OVERLAY_STUDIO_API_KEY` (or `API_KEY`), `OVERLAY_STUDIO_API_URL`,
    /// `OVERLAY_STUDIO_MODEL` and `OVERLAY_STUDIO_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let api_key = env::var("OVERLAY_STUDIO_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        let api_url =
            env::var("OVERLAY_STUDIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let model = env::var("OVERLAY_STUDIO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let timeout_ms = parse_env("OVERLAY_STUDIO_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_key,
            api_url,
            model,
            timeout_ms,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Editor behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub commit_mode: CommitMode,
    /// Maximum undo depth; `None` keeps every snapshot.
    pub history_limit: Option<usize>,
    pub handle_radius: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            commit_mode: CommitMode::default(),
            history_limit: None,
            handle_radius: DEFAULT_HANDLE_RADIUS,
        }
    }
}

impl EditorConfig {
    /// Read `OVERLAY_STUDIO_COMMIT_MODE` and `OVERLAY_STUDIO_HISTORY_LIMIT`.
    pub fn from_env() -> Self {
        Self {
            commit_mode: parse_env("OVERLAY_STUDIO_COMMIT_MODE").unwrap_or_default(),
            history_limit: parse_env("OVERLAY_STUDIO_HISTORY_LIMIT"),
            handle_radius: DEFAULT_HANDLE_RADIUS,
        }
    }

    pub fn with_commit_mode(mut self, mode: CommitMode) -> Self {
        self.commit_mode = mode;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}

// Unset is silent; a malformed value is logged and ignored.
fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_mode_parse() {
        assert_eq!("move".parse::<CommitMode>(), Ok(CommitMode::Move));
        assert_eq!(" Gesture ".parse::<CommitMode>(), Ok(CommitMode::Gesture));
        assert!("batch".parse::<CommitMode>().is_err());
    }

    #[test]
    fn test_endpoint() {
        let config = ProviderConfig::default().with_api_url("http://localhost:9000/");
        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn test_editor_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.commit_mode, CommitMode::Gesture);
        assert_eq!(config.history_limit, None);
        assert_eq!(config.with_history_limit(20).history_limit, Some(20));
    }
}
