//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use garden_core::plants::{default_catalog, validate_catalog};
use garden_core::{DEFAULT_LATENCY, DEFAULT_PERIOD, SampleRanges};
use garden_types::{PlantRecord, WeatherSnapshot};

/// Color theme for the terminal dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between snapshot refreshes
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Simulated fetch delay in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Fixed RNG seed for reproducible data (random when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Retries per refresh for transient source failures
    #[serde(default)]
    pub max_retries: u32,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Use Fahrenheit for temperature
    #[serde(default)]
    pub fahrenheit: bool,

    /// Dashboard theme
    #[serde(default)]
    pub theme: ThemeChoice,

    /// Sampling ranges for synthetic readings
    #[serde(default)]
    pub ranges: SampleRanges,

    /// Weather template attached to every snapshot
    #[serde(default)]
    pub weather: WeatherSnapshot,

    /// Plant catalog; the built-in catalog is used when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plants: Vec<PlantRecord>,
}

fn default_refresh_secs() -> u64 {
    DEFAULT_PERIOD.as_secs()
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            latency_ms: default_latency_ms(),
            seed: None,
            max_retries: 0,
            no_color: false,
            fahrenheit: false,
            theme: ThemeChoice::default(),
            ranges: SampleRanges::default(),
            weather: WeatherSnapshot::default(),
            plants: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("garden")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if missing or
    /// unreadable.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => eprintln!("Warning: {:#}", e),
            }
        }
        Self::default()
    }

    /// Load and validate config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Save config to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = self.to_toml()?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_secs == 0 {
            anyhow::bail!("refresh_secs must be > 0");
        }
        self.ranges.validate().context("Invalid [ranges]")?;
        validate_catalog(&self.plants).context("Invalid [[plants]]")?;
        Ok(())
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// The configured plants, or the built-in catalog.
    pub fn catalog(&self) -> Vec<PlantRecord> {
        if self.plants.is_empty() {
            default_catalog()
        } else {
            self.plants.clone()
        }
    }
}

/// Resolve seed: explicit flag, then config, then none (OS entropy).
pub fn resolve_seed(flag: Option<u64>, config: &Config) -> Option<u64> {
    flag.or(config.seed)
}

/// Resolve refresh period: explicit flag overrides config.
pub fn resolve_period(flag_secs: Option<u64>, config: &Config) -> Duration {
    flag_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.refresh_period())
}
