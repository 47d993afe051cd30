use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};

use crate::{
    model::{DashboardInputs, Location, Metric, RangeMode},
    query::DEFAULT_TIMEZONE,
};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Lower bound applied to `timeout_secs`; zero would time out every request.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Where and how the hourly data is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timezone: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

/// Input values the dashboard starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub metric: Metric,
    pub range: RangeMode,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let location = Location::default();
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            metric: Metric::default(),
            range: RangeMode::default(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [api]
/// timezone = "Europe/Berlin"
///
/// [defaults]
/// latitude = 48.137
/// longitude = 11.575
/// metric = "precipitation"
/// range = "historical"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Snapshot the dashboard starts from.
    pub fn initial_inputs(&self) -> DashboardInputs {
        DashboardInputs {
            location: Location::new(self.defaults.latitude, self.defaults.longitude),
            metric: self.defaults.metric,
            range: self.defaults.range,
        }
    }

    pub fn set_initial_inputs(&mut self, inputs: &DashboardInputs) {
        self.defaults.latitude = inputs.location.latitude;
        self.defaults.longitude = inputs.location.longitude;
        self.defaults.metric = inputs.metric;
        self.defaults.range = inputs.range;
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
