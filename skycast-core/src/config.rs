use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::open_meteo::{DEFAULT_FORECAST_BASE, DEFAULT_GEOCODING_BASE};

/// Coordinates used by the "use my location" entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_place = "Kolkata"
/// language = "en"
///
/// [location]
/// latitude = 22.56
/// longitude = 88.36
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Place looked up on startup.
    pub default_place: String,
    pub language: String,
    /// How many geocoding candidates to ask for.
    pub result_count: u8,
    pub debounce_ms: u64,
    pub geocoding_base_url: String,
    pub forecast_base_url: String,
    /// Without this the location entry point reports "not supported".
    pub location: Option<LocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_place: "Kolkata".to_string(),
            language: "en".to_string(),
            result_count: 8,
            debounce_ms: 250,
            geocoding_base_url: DEFAULT_GEOCODING_BASE.to_string(),
            forecast_base_url: DEFAULT_FORECAST_BASE.to_string(),
            location: None,
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!(
                "Coordinates out of range: {latitude}, {longitude}.\n\
                 Latitude must be within -90..90 and longitude within -180..180."
            ));
        }
        self.location = Some(LocationConfig { latitude, longitude });
        Ok(())
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
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_public_service() {
        let cfg = Config::default();
        assert_eq!(cfg.default_place, "Kolkata");
        assert_eq!(cfg.result_count, 8);
        assert_eq!(cfg.debounce(), Duration::from_millis(250));
        assert!(cfg.location.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_place = \"Oslo\"\n[location]\nlatitude = 59.9\nlongitude = 10.7\n")
            .expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.default_place, "Oslo");
        assert_eq!(cfg.language, "en");
        assert_eq!(
            cfg.location,
            Some(LocationConfig {
                latitude: 59.9,
                longitude: 10.7
            })
        );
    }

    #[test]
    fn save_then_load_in_nested_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a").join("b").join("config.toml");

        let mut cfg = Config {
            language: "de".into(),
            ..Config::default()
        };
        cfg.set_location(52.52, 13.41).expect("valid coordinates");
        cfg.save_to(&path).expect("save");

        assert_eq!(Config::load_from(&path).expect("load"), cfg);
    }

    #[test]
    fn garbage_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "result_count = \"many\"").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn set_location_rejects_out_of_range() {
        let mut cfg = Config::default();
        let err = cfg.set_location(91.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(cfg.location.is_none());
    }
}
