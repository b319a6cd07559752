//! Start-up configuration for the application stores.

use std::{fs::read_to_string, path::Path, time::Duration};

use {
    serde::{Deserialize, Serialize},
    serde_json::from_str,
    tracing::debug,
};

use crate::error::ConfigError;

/// How long a toast stays visible before it expires on its own.
pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_millis(2000);

/// Storage key under which the theme preference is kept.
pub const DEFAULT_THEME_KEY: &str = "theme";

/// Tunables shared by the stores, loaded once at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoresConfig {
    /// Toast lifetime in milliseconds.
    pub toast_lifetime_ms: u64,
    /// Key used to read (and optionally write) the theme preference.
    pub theme_key: String,
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            toast_lifetime_ms: DEFAULT_TOAST_LIFETIME.as_millis() as u64,
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl StoresConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or if a
    /// value is unusable (zero lifetime, empty key).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading store config from {:?}", path);
        let contents = read_to_string(path)?;
        let config: Self = from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The toast lifetime as a [`Duration`].
    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_millis(self.toast_lifetime_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.toast_lifetime_ms == 0 {
            return Err(ConfigError::InvalidValue {
                reason: "toast_lifetime_ms must be positive".to_string(),
            });
        }
        if self.theme_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                reason: "theme_key must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
