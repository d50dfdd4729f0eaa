//! Configuration loader/writer plus strongly typed settings structures.
//!
//! `config.toml` lives in the data directory (`~/.thavma-showroom/` unless
//! `SHOWROOM_DIR` or `--data-dir` says otherwise). The embedded default is
//! written there on first run. API settings can be overridden from the
//! environment so one build can point at different backends.

use crate::core::carousel::{AutoplayInterval, CarouselOptions};
use crate::network::{DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

pub const ENV_DATA_DIR: &str = "SHOWROOM_DIR";
pub const ENV_API_BASE_URL: &str = "SHOWROOM_API_BASE_URL";
pub const ENV_LOGIN_PATH: &str = "SHOWROOM_LOGIN_PATH";

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "showroom.log";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(skip)] // Set at runtime from the resolved data directory
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_true")]
    pub autoplay: bool,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_gallery_interval_ms")]
    pub gallery_interval_ms: u64,
    #[serde(default)]
    pub reset_on_interaction: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_theme_name")]
    pub theme: String,
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    crate::core::carousel::DEFAULT_INTERVAL_MS
}

fn default_gallery_interval_ms() -> u64 {
    4000
}

fn default_poll_timeout_ms() -> u64 {
    50
}

fn default_theme_name() -> String {
    "dark".to_string()
}

fn default_toast_secs() -> u64 {
    4
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval_ms: default_interval_ms(),
            gallery_interval_ms: default_gallery_interval_ms(),
            reset_on_interaction: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: default_poll_timeout_ms(),
            theme: default_theme_name(),
            toast_secs: default_toast_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            carousel: CarouselConfig::default(),
            ui: UiConfig::default(),
            data_dir: PathBuf::new(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CarouselConfig {
    fn options(&self, interval_ms: u64) -> CarouselOptions {
        CarouselOptions {
            autoplay: self.autoplay,
            interval: AutoplayInterval::from_millis(interval_ms).unwrap_or_default(),
            reset_on_interaction: self.reset_on_interaction,
        }
    }

    /// Options for a standalone carousel
    pub fn carousel_options(&self) -> CarouselOptions {
        self.options(self.interval_ms)
    }

    /// Options for the carousels on gallery cards
    pub fn gallery_options(&self) -> CarouselOptions {
        self.options(self.gallery_interval_ms)
    }
}

impl UiConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}

impl Config {
    /// Load from the data directory, writing defaults on first run.
    ///
    /// `data_dir` overrides `SHOWROOM_DIR`; `config_path` overrides the
    /// config file inside the data directory.
    pub fn load_with_options(data_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::base_dir()?,
        };

        // Idempotent - only creates missing files
        Self::extract_defaults(&data_dir)?;

        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join(CONFIG_FILE));

        let mut config = Self::load_from_path(&path)?;
        config.data_dir = data_dir;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse one config file without touching the environment
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, contents).context("Failed to write config file")?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Apply API overrides; `lookup` is the environment in production
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            tracing::info!("API base URL overridden by {}: {}", ENV_API_BASE_URL, url);
            self.api.base_url = url.trim().to_string();
        }
        if let Some(path) = lookup(ENV_LOGIN_PATH).filter(|v| !v.trim().is_empty()) {
            tracing::info!("Login path overridden by {}: {}", ENV_LOGIN_PATH, path);
            self.api.login_path = path.trim().to_string();
        }
    }

    /// Reject settings that would break the client at runtime
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            problems.push(format!(
                "api.base_url must start with http:// or https:// (got '{}')",
                self.api.base_url
            ));
        }
        if self.api.login_path.trim().is_empty() {
            problems.push("api.login_path must not be empty".to_string());
        }
        if self.api.timeout_secs == 0 {
            problems.push("api.timeout_secs must be greater than zero".to_string());
        }
        if self.carousel.interval_ms == 0 {
            problems.push("carousel.interval_ms must be greater than zero".to_string());
        }
        if self.carousel.gallery_interval_ms == 0 {
            problems.push("carousel.gallery_interval_ms must be greater than zero".to_string());
        }
        if crate::theme::ThemePresets::by_name(&self.ui.theme).is_none() {
            problems.push(format!(
                "ui.theme '{}' is unknown (expected one of: {})",
                self.ui.theme,
                crate::theme::ThemePresets::names().join(", ")
            ));
        }

        if problems.is_empty() {
            return Ok(());
        }
        for problem in &problems {
            tracing::warn!("Config problem: {}", problem);
        }
        bail!("Invalid configuration:\n  {}", problems.join("\n  "))
    }

    fn extract_defaults(data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write config.toml")?;
            tracing::info!("Extracted config.toml to {:?}", config_path);
        }
        Ok(())
    }

    /// Base data directory (~/.thavma-showroom)
    /// Can be overridden with SHOWROOM_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(ENV_DATA_DIR) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".thavma-showroom"))
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Log file path for a data directory
    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join(LOG_FILE)
    }
}
