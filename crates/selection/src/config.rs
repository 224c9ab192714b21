use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SelectionError};
use crate::playback::{manifest_url, videos_url};

/// Backend endpoint used when no configuration is supplied.
pub const DEFAULT_BASE_ENDPOINT: &str = "http://localhost:8080";

/// Sample video selected on first load so playback starts without user input.
pub const DEFAULT_VIDEO_ID: &str = "56f81959-f5b9-47af-a0ef-996bf55c43be";

/// Overrides `base_endpoint` when set.
pub const ENV_BASE_ENDPOINT: &str = "VIDEO_BASE_ENDPOINT";
/// Overrides `default_video_id` when set.
pub const ENV_DEFAULT_VIDEO_ID: &str = "VIDEO_DEFAULT_ID";

/// Values supplied to the selection controller at initialization.
///
/// Missing fields in a config file fall back to the defaults.
///
/// # Example
/// ```
/// use selection::SelectionConfig;
///
/// let config = SelectionConfig::from_json_str(r#"{ "base_endpoint": "https://media.test/" }"#)
///     .expect("valid config");
///
/// assert_eq!(config.base_endpoint, "https://media.test");
/// assert_eq!(config.default_video_id, selection::config::DEFAULT_VIDEO_ID);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub base_endpoint: String,
    pub default_video_id: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            base_endpoint: DEFAULT_BASE_ENDPOINT.to_owned(),
            default_video_id: DEFAULT_VIDEO_ID.to_owned(),
        }
    }
}

impl SelectionConfig {
    /// Loads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SelectionError::ConfigIo {
            context: "failed to read config file",
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| SelectionError::ConfigSerialization {
                path: path.to_path_buf(),
                source,
            })?;
        let config = config.normalized()?;
        info!(
            path = %path.display(),
            base_endpoint = %config.base_endpoint,
            "config loaded"
        );
        Ok(config)
    }

    /// Parses and validates config JSON held in memory.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|source| SelectionError::ConfigSerialization {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        config.normalized()
    }

    /// Writes the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(|source| {
            SelectionError::ConfigSerialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, text).map_err(|source| SelectionError::ConfigIo {
            context: "failed to write config file",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `VIDEO_BASE_ENDPOINT` / `VIDEO_DEFAULT_ID` from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, then re-validates.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_endpoint) = lookup(ENV_BASE_ENDPOINT) {
            debug!(%base_endpoint, "base endpoint overridden from environment");
            self.base_endpoint = base_endpoint;
        }
        if let Some(default_video_id) = lookup(ENV_DEFAULT_VIDEO_ID) {
            debug!(%default_video_id, "default video overridden from environment");
            self.default_video_id = default_video_id;
        }
        self.normalized()
    }

    /// Manifest URL for `video_id` on the configured backend.
    pub fn manifest_url(&self, video_id: &str) -> String {
        manifest_url(&self.base_endpoint, video_id)
    }

    /// Video collection endpoint (upload and listing) on the configured backend.
    pub fn videos_url(&self) -> String {
        videos_url(&self.base_endpoint)
    }

    fn normalized(mut self) -> Result<Self> {
        let endpoint = self.base_endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(SelectionError::InvalidConfig {
                reason: format!(
                    "base_endpoint must start with http:// or https://, got {:?}",
                    self.base_endpoint
                ),
            });
        }
        let host = endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        if host.trim_matches('/').is_empty() {
            return Err(SelectionError::InvalidConfig {
                reason: format!("base_endpoint has no host: {:?}", self.base_endpoint),
            });
        }
        let endpoint = endpoint.strip_suffix('/').unwrap_or(endpoint);
        self.base_endpoint = endpoint.to_owned();
        Ok(self)
    }
}
