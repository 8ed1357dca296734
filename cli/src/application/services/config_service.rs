//! Application service: configuration use-cases.

use anyhow::Result;
use tracing::debug;

use crate::application::ports::SettingsStore;
use crate::domain::config::{ArtifactPaths, Configuration, RawConfig, validate};

/// Settings-file values overlaid with command-line values, plus what they
/// validate to.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub raw: RawConfig,
    pub config: Configuration,
    pub paths: ArtifactPaths,
}

/// Load settings, overlay `flags`, and validate the result.
///
/// # Errors
///
/// Returns a `ConfigError` if the settings file cannot be loaded or the
/// merged input is invalid.
pub fn resolve(store: &impl SettingsStore, flags: RawConfig) -> Result<ResolvedConfig> {
    let settings = store.load()?;
    let raw = settings.merge(flags);
    let config = validate(&raw)?;
    let paths = ArtifactPaths::resolve(&raw, &config);
    debug!(
        kernel = config.kernel_name(),
        home = config.home_directory(),
        remote_launcher = config.remote_launcher_path(),
        launcher_out = %paths.launcher.display(),
        descriptor_out = %paths.descriptor.display(),
        "configuration validated"
    );
    Ok(ResolvedConfig { raw, config, paths })
}
