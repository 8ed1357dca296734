//! Infrastructure implementation of the `SettingsStore` port.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::application::ports::SettingsStore;
use crate::domain::config::RawConfig;
use crate::domain::error::ConfigError;

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "KERNEL_SETUP_CONFIG";

/// Production implementation of `SettingsStore` backed by a YAML file.
///
/// Lookup order: the explicit `--config` path, then `$KERNEL_SETUP_CONFIG`,
/// then `~/.kernel-setup/config.yaml`. Only an explicit path must exist;
/// otherwise a missing file means "no settings".
#[derive(Debug, Clone, Default)]
pub struct YamlSettingsStore {
    explicit: Option<PathBuf>,
}

impl YamlSettingsStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl SettingsStore for YamlSettingsStore {
    fn load(&self) -> Result<RawConfig> {
        let Some(path) = self.path() else {
            return Ok(RawConfig::default());
        };
        if self.explicit.is_none() && !path.exists() {
            debug!(path = %path.display(), "no settings file");
            return Ok(RawConfig::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Settings {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let raw: RawConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Settings {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), "settings loaded");
        Ok(raw)
    }

    fn path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }
        if let Ok(val) = std::env::var(SETTINGS_ENV)
            && !val.is_empty()
        {
            return Some(PathBuf::from(val));
        }
        dirs::home_dir().map(|h| h.join(".kernel-setup").join("config.yaml"))
    }
}
