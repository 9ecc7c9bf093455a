use chrono::TimeDelta;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_RETENTION_DAYS: u32 = 14;
pub const DEFAULT_ATTRIBUTE_KEY: &str = "user.com.ath0.tm.date";

const APP_NAME: &str = "agesweep";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Days an entry is kept after it was first seen.
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_attribute_key")]
    pub attribute_key: String,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

// Default value functions for serde
const fn default_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}
fn default_attribute_key() -> String {
    DEFAULT_ATTRIBUTE_KEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days: default_days(),
            verbose: false,
            dry_run: false,
            attribute_key: default_attribute_key(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from the per-user config file, falling back to defaults
    /// when there is no config directory or no file in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load() -> Result<Self> {
        let Ok(config_path) = Self::config_path() else {
            debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!("No config file at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Loads settings from an explicit file, which must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        let settings = Self::from_toml(&content).wrap_err_with(|| format!("Invalid config file {}", path.display()))?;
        info!("Settings loaded from {:?}", path);
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML or fails validation.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns an error when the attribute key is empty.
    pub fn validate(&self) -> Result<()> {
        if self.attribute_key.trim().is_empty() {
            return Err(eyre!("attribute_key must not be empty"));
        }
        Ok(())
    }

    /// Retention threshold as a duration.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` does not fit a chrono duration.
    pub fn retention(&self) -> Result<TimeDelta> {
        TimeDelta::try_days(i64::from(self.days)).ok_or_else(|| eyre!("Retention of {} days is out of range", self.days))
    }

    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| eyre!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
