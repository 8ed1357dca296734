//! Domain types and validators for kernel configuration.
//!
//! Pure functions only. No I/O, no filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use kernel_setup_common::{DESCRIPTOR_FILE_NAME, user_kernel_dir};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_KERNEL_COMMAND: &str = "python -m ipykernel";

/// Kernel names become directory names and appear in the launcher header.
pub static KERNEL_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex")
});

pub static LANGUAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_+.-]+$").expect("valid regex")
});

pub static ENV_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex")
});

/// Characters that would break out of the double-quoted `HOME` assignment in
/// the launcher, plus line breaks and NUL.
pub const PATH_FORBIDDEN_CHARS: &[char] = &['"', '`', '$', '\\', '\n', '\r', '\0'];

/// Template delimiters. No user value may contain them, so rendered output
/// can only hold a placeholder if the template itself is broken.
pub const TEMPLATE_DELIMITERS: &[&str] = &["{{", "}}"];

// ── Raw input ────────────────────────────────────────────────────────────────

/// Unvalidated kernel settings, as read from the settings file or flags.
///
/// Every field is optional so that a settings file and command-line flags
/// can each supply part of the input (see [`RawConfig::merge`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Home directory on the cluster.
    pub home: Option<String>,
    pub kernel_name: Option<String>,
    /// Where the launcher lives on the cluster; written into `argv[0]`.
    pub remote_launcher: Option<String>,
    /// Local output path for the launcher script.
    pub launcher_out: Option<String>,
    /// Local output path for `kernel.json`.
    pub descriptor_out: Option<String>,
    pub display_name: Option<String>,
    pub language: Option<String>,
    /// Shell lines run before the kernel starts (e.g. `module load python`).
    pub setup: Vec<String>,
    pub kernel_command: Option<String>,
    pub env: BTreeMap<String, String>,
}

impl RawConfig {
    /// Overlay `over` on top of `self`. Fields set in `over` win; a non-empty
    /// `setup` list replaces the base list; `env` entries are merged per key.
    #[must_use]
    pub fn merge(self, over: RawConfig) -> RawConfig {
        let mut env = self.env;
        env.extend(over.env);
        RawConfig {
            home: over.home.or(self.home),
            kernel_name: over.kernel_name.or(self.kernel_name),
            remote_launcher: over.remote_launcher.or(self.remote_launcher),
            launcher_out: over.launcher_out.or(self.launcher_out),
            descriptor_out: over.descriptor_out.or(self.descriptor_out),
            display_name: over.display_name.or(self.display_name),
            language: over.language.or(self.language),
            setup: if over.setup.is_empty() {
                self.setup
            } else {
                over.setup
            },
            kernel_command: over.kernel_command.or(self.kernel_command),
            env,
        }
    }
}

// ── Validated configuration ──────────────────────────────────────────────────

/// Validated, immutable kernel configuration.
///
/// Only [`validate`] constructs one, so every accessor returns data that
/// already satisfies the path and name rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    home_directory: String,
    kernel_name: String,
    remote_launcher_path: String,
    display_name: String,
    language: String,
    setup_commands: Vec<String>,
    kernel_command: String,
    env: BTreeMap<String, String>,
}

impl Configuration {
    #[must_use]
    pub fn home_directory(&self) -> &str {
        &self.home_directory
    }

    #[must_use]
    pub fn kernel_name(&self) -> &str {
        &self.kernel_name
    }

    #[must_use]
    pub fn remote_launcher_path(&self) -> &str {
        &self.remote_launcher_path
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn setup_commands(&self) -> &[String] {
        &self.setup_commands
    }

    #[must_use]
    pub fn kernel_command(&self) -> &str {
        &self.kernel_command
    }

    #[must_use]
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }
}

/// Local destinations for the two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub launcher: PathBuf,
    pub descriptor: PathBuf,
}

impl ArtifactPaths {
    /// Resolve output paths from raw input, defaulting to the launcher's
    /// remote path and the per-user Jupyter kernel directory under home.
    #[must_use]
    pub fn resolve(raw: &RawConfig, config: &Configuration) -> Self {
        let launcher = raw
            .launcher_out
            .as_deref()
            .map_or_else(|| PathBuf::from(config.remote_launcher_path()), PathBuf::from);
        let descriptor = raw.descriptor_out.as_deref().map_or_else(
            || {
                user_kernel_dir(
                    std::path::Path::new(config.home_directory()),
                    config.kernel_name(),
                )
                .join(DESCRIPTOR_FILE_NAME)
            },
            PathBuf::from,
        );
        Self {
            launcher,
            descriptor,
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validate raw input into a [`Configuration`].
///
/// The remote launcher path falls back to `launcher_out`, then to
/// `<home>/<kernel_name>-kernel.sh`.
///
/// # Errors
///
/// Returns `ConfigError::Missing` when `home` or `kernel_name` is absent and
/// `ConfigError::Invalid` naming the first field that breaks a rule.
pub fn validate(raw: &RawConfig) -> Result<Configuration, ConfigError> {
    let home = raw.home.as_deref().ok_or(ConfigError::Missing {
        field: "home",
        key: "home",
    })?;
    check_absolute_path("home", home)?;
    let home = home.trim_end_matches('/');
    let home = if home.is_empty() { "/" } else { home };

    let kernel_name = raw.kernel_name.as_deref().ok_or(ConfigError::Missing {
        field: "kernel-name",
        key: "kernel_name",
    })?;
    validate_kernel_name(kernel_name)?;

    // Report errors against the flag the path actually came from.
    let (launcher_field, remote_launcher) = match (&raw.remote_launcher, &raw.launcher_out) {
        (Some(remote), _) => ("remote-launcher", remote.clone()),
        (None, Some(local)) => ("launcher-out", local.clone()),
        (None, None) => (
            "remote-launcher",
            format!("{}/{kernel_name}-kernel.sh", home.trim_end_matches('/')),
        ),
    };
    if launcher_field == "launcher-out" && !remote_launcher.starts_with('/') {
        return Err(ConfigError::invalid(
            "launcher-out",
            format!(
                "'{remote_launcher}' is relative; pass --remote-launcher with the absolute path on the cluster"
            ),
        ));
    }
    check_absolute_path(launcher_field, &remote_launcher)?;
    if remote_launcher.ends_with('/') {
        return Err(ConfigError::invalid(
            launcher_field,
            "must name a file, not a directory",
        ));
    }

    let display_name = raw.display_name.as_deref().unwrap_or(kernel_name);
    check_line("display-name", display_name)?;

    let language = raw.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    if !LANGUAGE_RE.is_match(language) {
        return Err(ConfigError::invalid(
            "language",
            format!("'{language}' must match [A-Za-z0-9_+.-]+"),
        ));
    }

    for line in &raw.setup {
        check_line("setup", line)?;
    }

    let kernel_command = raw
        .kernel_command
        .as_deref()
        .unwrap_or(DEFAULT_KERNEL_COMMAND);
    check_line("kernel-command", kernel_command)?;

    for (key, value) in &raw.env {
        if !ENV_KEY_RE.is_match(key) {
            return Err(ConfigError::invalid(
                "env",
                format!("'{key}' is not a valid environment variable name"),
            ));
        }
        if value.contains(['\n', '\r', '\0']) {
            return Err(ConfigError::invalid(
                "env",
                format!("value of {key} must be a single line"),
            ));
        }
    }

    Ok(Configuration {
        home_directory: home.to_string(),
        kernel_name: kernel_name.to_string(),
        remote_launcher_path: remote_launcher,
        display_name: display_name.to_string(),
        language: language.to_string(),
        setup_commands: raw.setup.clone(),
        kernel_command: kernel_command.to_string(),
        env: raw.env.clone(),
    })
}

/// Validates a kernel name against `[A-Za-z0-9_-]+`.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for the `kernel-name` field.
pub fn validate_kernel_name(name: &str) -> Result<(), ConfigError> {
    if KERNEL_NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            "kernel-name",
            format!("'{name}' must match [A-Za-z0-9_-]+"),
        ))
    }
}

fn check_absolute_path(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    if let Some(c) = value.chars().find(|c| PATH_FORBIDDEN_CHARS.contains(c)) {
        return Err(ConfigError::invalid(
            field,
            format!("contains forbidden character {c:?}"),
        ));
    }
    check_delimiters(field, value)?;
    if !value.starts_with('/') {
        return Err(ConfigError::invalid(
            field,
            format!("'{value}' must be an absolute path"),
        ));
    }
    Ok(())
}

fn check_line(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    if value.contains(['\n', '\r', '\0']) {
        return Err(ConfigError::invalid(field, "must be a single line"));
    }
    check_delimiters(field, value)
}

fn check_delimiters(field: &'static str, value: &str) -> Result<(), ConfigError> {
    match TEMPLATE_DELIMITERS.iter().find(|d| value.contains(**d)) {
        Some(d) => Err(ConfigError::invalid(
            field,
            format!("contains template delimiter {d}"),
        )),
        None => Ok(()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
