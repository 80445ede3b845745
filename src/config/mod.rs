//! Configuration loading and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `PLAYTIME__SECTION__KEY` environment variables, then the plain
//! `YOUTUBE_API_KEY` / `YOUTUBE_API_VERSION` / `MAX_RESULTS` / `STATIC_URL`
//! variables.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Upper bound the video API accepts for `maxResults`.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Video API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// API version path segment, e.g. "v3"
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Items requested per playlist page
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Base URL; the version and resource are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_api_version() -> String {
    "v3".to_string()
}

fn default_max_results() -> u32 {
    MAX_PAGE_SIZE
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_version: default_api_version(),
            max_results: default_max_results(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl fmt::Debug for YouTubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeConfig")
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("max_results", &self.max_results)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub youtube: YouTubeConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            youtube: YouTubeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// A missing file is not an error. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::layered(path)?;
        config.validate()?;
        Ok(config)
    }

    fn layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        let config = builder
            .add_source(
                ::config::Environment::with_prefix("PLAYTIME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("youtube.api_key", env_var("YOUTUBE_API_KEY"))?
            .set_override_option("youtube.api_version", env_var("YOUTUBE_API_VERSION"))?
            .set_override_option("youtube.max_results", env_var("MAX_RESULTS"))?
            .set_override_option("youtube.base_url", env_var("STATIC_URL"))?
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        config.youtube.base_url =
            strip_endpoint_suffix(&config.youtube.base_url, &config.youtube.api_version);
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.youtube.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "YouTube API key is required (set YOUTUBE_API_KEY)".to_string(),
            ));
        }

        if self.youtube.max_results == 0 || self.youtube.max_results > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.youtube.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if let Err(e) = Url::parse(&self.youtube.base_url) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid API base URL {:?}: {}",
                self.youtube.base_url, e
            )));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reduce a full endpoint such as `.../youtube/v3/playlistItems` to the
/// base URL the client appends `/{version}/{resource}` to.
fn strip_endpoint_suffix(base_url: &str, api_version: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    for resource in ["playlistItems", "videos"] {
        let suffix = format!("/{}/{}", api_version, resource);
        if let Some(base) = trimmed.strip_suffix(&suffix) {
            return base.to_string();
        }
    }
    trimmed.to_string()
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
