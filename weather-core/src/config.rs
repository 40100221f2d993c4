use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::WeatherError, provider::darksky::DEFAULT_BASE_URL};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "DARK_SKY_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.darksky.net/forecast"
/// query_time = "00:00:00"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Endpoint root, defaults to the public Dark Sky forecast API.
    pub base_url: Option<String>,

    /// Time-of-day attached to every queried day, `HH:MM:SS`. Defaults to midnight.
    pub query_time: Option<String>,
}

impl Config {
    /// Load config from the platform config directory, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
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
        let dirs = ProjectDirs::from("dev", "weather-history", "weather-history")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Let a non-empty value (usually from the environment) take precedence over the stored key.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(WeatherError::MissingCredential)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn query_time(&self) -> Result<NaiveTime, WeatherError> {
        match self.query_time.as_deref() {
            None => Ok(NaiveTime::MIN),
            Some(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
                .map_err(|e| WeatherError::malformed("config query_time", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        assert!(matches!(cfg.api_key(), Err(WeatherError::MissingCredential)));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert!(matches!(cfg.api_key(), Err(WeatherError::MissingCredential)));
    }

    #[test]
    fn override_takes_precedence_over_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let cfg = cfg.with_api_key_override(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key().unwrap(), "FROM_ENV");
    }

    #[test]
    fn empty_override_keeps_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let cfg = cfg.with_api_key_override(Some(String::new())).with_api_key_override(None);
        assert_eq!(cfg.api_key().unwrap(), "STORED");
    }

    #[test]
    fn defaults_for_base_url_and_query_time() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.query_time().unwrap(), NaiveTime::MIN);
    }

    #[test]
    fn invalid_query_time_is_malformed() {
        let cfg = Config { query_time: Some("noon".into()), ..Config::default() };
        assert!(matches!(cfg.query_time(), Err(WeatherError::MalformedInput { .. })));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9000/forecast".into()),
            query_time: Some("12:00:00".into()),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key().unwrap(), "KEY");
        assert_eq!(loaded.base_url(), "http://localhost:9000/forecast");
        assert_eq!(loaded.query_time().unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.api_key.is_none());
    }
}
