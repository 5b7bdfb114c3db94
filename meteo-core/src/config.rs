use directories::ProjectDirs;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::{
    error::{Result, WeatherError},
    provider::{
        ProviderId,
        open_meteo::{FORECAST_URL, GEOCODING_URL},
        wttr::WTTR_URL,
    },
};

/// Base URLs for each HTTP boundary.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub wttr: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: GEOCODING_URL.to_string(),
            forecast: FORECAST_URL.to_string(),
            wttr: WTTR_URL.to_string(),
        }
    }
}

/// Optional defaults read from disk. Command-line flags win over these.
///
/// Values are kept as written and validated the same way flags are.
///
/// Example TOML:
/// ```toml
/// units = "imperial"
/// days = 3
/// provider = "open-meteo"
/// style = "art"
/// color = false
///
/// [endpoints]
/// wttr = "https://wttr.in"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub units: Option<String>,
    pub days: Option<i64>,
    pub provider: Option<String>,
    pub style: Option<String>,
    pub color: Option<bool>,
    pub endpoints: Endpoints,
}

impl Config {
    /// Provider named in the file, or Open-Meteo when unset.
    pub fn provider_id(&self) -> Result<ProviderId> {
        match &self.provider {
            Some(name) => ProviderId::try_from(name.as_str()),
            None => Ok(ProviderId::default()),
        }
    }

    /// Load config from the platform path, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            WeatherError::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        Self::parse(&contents).map_err(|e| match e {
            WeatherError::Config(msg) => {
                WeatherError::config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| WeatherError::config(e.to_string()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "weather")
            .ok_or_else(|| WeatherError::config("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
