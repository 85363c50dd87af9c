use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// API root; chat endpoints live under `{base_url}/chat`.
    #[serde(default = "ServerConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ServerConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl ServerConfig {
    fn default_base_url() -> String {
        "http://localhost:8000/api".to_string()
    }

    const fn default_request_timeout_secs() -> u64 {
        30
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    #[serde(default = "AssistantConfig::default_greeting")]
    pub greeting: String,
    #[serde(default = "AssistantConfig::default_error_message")]
    pub error_message: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            greeting: Self::default_greeting(),
            error_message: Self::default_error_message(),
        }
    }
}

impl AssistantConfig {
    fn default_greeting() -> String {
        "Hi! I'm your hotel assistant. I can help you find the perfect hotel for your stay. Just tell me what you're looking for!".to_string()
    }

    fn default_error_message() -> String {
        "Sorry, I encountered an error. Please try again.".to_string()
    }
}

/// Limits applied when rendering hotel cards.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_description_max_chars")]
    pub description_max_chars: usize,
    #[serde(default = "DisplayConfig::default_max_amenities")]
    pub max_amenities: usize,
    #[serde(default = "DisplayConfig::default_max_highlights")]
    pub max_highlights: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_max_chars: Self::default_description_max_chars(),
            max_amenities: Self::default_max_amenities(),
            max_highlights: Self::default_max_highlights(),
        }
    }
}

impl DisplayConfig {
    const fn default_description_max_chars() -> usize {
        150
    }

    const fn default_max_amenities() -> usize {
        5
    }

    const fn default_max_highlights() -> usize {
        3
    }
}

impl Config {
    /// `~/hotelier/config.json`
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("hotelier"))
    }

    /// Load the config at `path`, failing if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'hotelier init' to create config.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` (or the default location), falling back to built-in
    /// defaults when no file exists. A file that exists but does not parse is
    /// still an error.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            warn!(
                "No config file at {}, using defaults (server {})",
                path.display(),
                ServerConfig::default_base_url()
            );
            Ok(Self::default())
        }
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.server.base_url).map_err(|e| {
            anyhow::anyhow!("Invalid server.base_url '{}': {e}", self.server.base_url)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "server.base_url must be http or https, got '{}'",
                url.scheme()
            );
        }
        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Write the default template to `~/hotelier/config.json`.
    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    /// Write the default template to `path`, refusing to overwrite.
    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, template)?;
        Ok(())
    }
}
