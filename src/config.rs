//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    APP_NAME, DEFAULT_API_KEY_ENV, DEFAULT_DEPTH, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_PORT,
    MAX_DEPTH,
};
use crate::models::{HarmonyRule, Hsl};
use crate::services::SuggestionConfig;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "CHROMAEUCLID_CONFIG_DIR";

/// AI suggestion service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// API key stored in the config file (takes precedence over the environment)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset
    pub api_key_env: String,
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Request timeout in seconds; unset waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

/// Starting selections for the explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Base hue in degrees
    pub base_hue: f64,
    /// Base saturation percentage
    pub base_saturation: f64,
    /// Base lightness percentage
    pub base_lightness: f64,
    /// Harmony rule
    pub harmony: HarmonyRule,
    /// Subdivision depth
    pub depth: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        let base = Hsl::default();
        Self {
            base_hue: base.h,
            base_saturation: base.s,
            base_lightness: base.l,
            harmony: HarmonyRule::default(),
            depth: DEFAULT_DEPTH,
        }
    }
}

impl ExplorerConfig {
    /// The configured base color.
    #[must_use]
    pub fn base(&self) -> Hsl {
        Hsl::new(self.base_hue, self.base_saturation, self.base_lightness)
    }

    /// Stores `base` as the starting color.
    pub fn set_base(&mut self, base: Hsl) {
        self.base_hue = base.h;
        self.base_saturation = base.s;
        self.base_lightness = base.l;
    }
}

/// Web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ChromaEuclid/config.toml`
/// - macOS: `~/Library/Application Support/ChromaEuclid/config.toml`
/// - Windows: `%APPDATA%\ChromaEuclid\config.toml`
///
/// Set `CHROMAEUCLID_CONFIG_DIR` to use another directory.
///
/// # Validation
///
/// - base hue in 0-360, saturation and lightness in 0-100
/// - depth in 1-12
/// - model and endpoint are non-empty
/// - port is non-zero
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI suggestion settings
    pub ai: AiConfig,
    /// Explorer defaults
    pub explorer: ExplorerConfig,
    /// Web server settings
    pub server: ServerConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Uses `CHROMAEUCLID_CONFIG_DIR` when set, otherwise:
    /// - Linux: `~/.config/ChromaEuclid/`
    /// - macOS: `~/Library/Application Support/ChromaEuclid/`
    /// - Windows: `%APPDATA%\ChromaEuclid\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let explorer = &self.explorer;
        if !(0.0..=360.0).contains(&explorer.base_hue) {
            anyhow::bail!("Base hue {} out of range (0-360)", explorer.base_hue);
        }
        if !(0.0..=100.0).contains(&explorer.base_saturation) {
            anyhow::bail!(
                "Base saturation {} out of range (0-100)",
                explorer.base_saturation
            );
        }
        if !(0.0..=100.0).contains(&explorer.base_lightness) {
            anyhow::bail!(
                "Base lightness {} out of range (0-100)",
                explorer.base_lightness
            );
        }
        if explorer.depth == 0 || explorer.depth > MAX_DEPTH {
            anyhow::bail!("Depth {} out of range (1-{})", explorer.depth, MAX_DEPTH);
        }

        if self.ai.model.trim().is_empty() {
            anyhow::bail!("AI model must not be empty");
        }
        if self.ai.endpoint.trim().is_empty() {
            anyhow::bail!("AI endpoint must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must not be 0");
        }

        Ok(())
    }

    /// Resolves the API key: the configured value, else the environment
    /// variable named by `ai.api_key_env`. Blank values count as unset.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.ai
            .api_key
            .clone()
            .or_else(|| std::env::var(&self.ai.api_key_env).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Builds the suggestion client settings with the resolved API key.
    #[must_use]
    pub fn suggestion_config(&self) -> SuggestionConfig {
        SuggestionConfig {
            api_key: self.resolve_api_key(),
            model: self.ai.model.clone(),
            endpoint: self.ai.endpoint.clone(),
            timeout: self.ai.timeout_secs.map(Duration::from_secs),
        }
    }
}
