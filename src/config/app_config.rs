//! Application configuration management

use crate::errors::{EwtError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External compiler configuration
    pub compiler: CompilerConfig,
    /// Remote YAML download configuration
    pub download: DownloadConfig,
    /// Generated site configuration
    pub site: SiteConfig,
}

/// Compiler-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// ESPHome executable looked up on PATH
    pub esphome_command: String,
    /// uv tool runner used as a fallback and for pre-releases
    pub uvx_command: String,
}

/// Download-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// User-Agent header sent when fetching remote YAML
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_system_proxy: bool,
}

/// Site-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// ESP Web Tools install button module
    pub esp_web_tools_url: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            esphome_command: "esphome".to_string(),
            uvx_command: "uvx".to_string(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: "ewt".to_string(),
            timeout_seconds: 30,
            use_system_proxy: true,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            esp_web_tools_url: "https://unpkg.com/esp-web-tools@10/dist/web/install-button.js?module"
                .to_string(),
        }
    }
}

impl AppConfig {
    /// Default location of the user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(crate::APP_NAME).join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EwtError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| EwtError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the explicit configuration file, or the default one if present,
    /// falling back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Loading configuration from {}", path.display());
                Self::load_from(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
