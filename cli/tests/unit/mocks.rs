//! Shared mock infrastructure for unit tests.
//!
//! Provides in-memory implementations of the application ports so each test
//! file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use kernel_setup_cli::application::ports::{
    ArtifactFile, ArtifactReader, ArtifactWriter, ProgressReporter, SettingsStore, WriteOptions,
    WriteOutcome,
};
use kernel_setup_cli::domain::{RawConfig, VerifyError, WriteError};

// ── Mock: in-memory filesystem ────────────────────────────────────────────────

/// Records every write and serves reads from the same map.
#[derive(Default)]
pub struct MemoryFs {
    pub files: RefCell<HashMap<PathBuf, (String, WriteOptions)>>,
    pub writes: RefCell<Vec<PathBuf>>,
    /// Paths whose writes fail with `PermissionDenied`.
    pub read_only: Vec<PathBuf>,
}

impl MemoryFs {
    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(Path::new(path))
            .map(|(content, _)| content.clone())
    }

    pub fn insert(&self, path: &str, content: &str, executable: bool) {
        self.files.borrow_mut().insert(
            PathBuf::from(path),
            (
                content.to_string(),
                WriteOptions {
                    executable,
                    create_parents: false,
                },
            ),
        );
    }
}

impl ArtifactWriter for MemoryFs {
    fn write(
        &self,
        path: &Path,
        content: &str,
        options: WriteOptions,
    ) -> Result<WriteOutcome, WriteError> {
        if self.read_only.iter().any(|p| p == path) {
            return Err(WriteError::new(
                path,
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ));
        }
        self.writes.borrow_mut().push(path.to_path_buf());
        let previous = self
            .files
            .borrow_mut()
            .insert(path.to_path_buf(), (content.to_string(), options));
        Ok(match previous {
            None => WriteOutcome::Created,
            Some((old, old_opts))
                if old == content && old_opts.executable == options.executable =>
            {
                WriteOutcome::Unchanged
            }
            Some(_) => WriteOutcome::Replaced,
        })
    }
}

impl ArtifactReader for MemoryFs {
    fn read(&self, path: &Path) -> Result<ArtifactFile, VerifyError> {
        match self.files.borrow().get(path) {
            Some((content, options)) => Ok(ArtifactFile {
                content: content.clone(),
                mode: Some(if options.executable { 0o755 } else { 0o644 }),
            }),
            None => Err(VerifyError::Unreadable {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
        }
    }
}

// ── Mock: settings ────────────────────────────────────────────────────────────

/// Returns fixed settings.
#[derive(Default)]
pub struct FixedSettings(pub RawConfig);

impl SettingsStore for FixedSettings {
    fn load(&self) -> Result<RawConfig> {
        Ok(self.0.clone())
    }

    fn path(&self) -> Option<PathBuf> {
        None
    }
}

/// Settings store whose file cannot be parsed.
pub struct BrokenSettings;

impl SettingsStore for BrokenSettings {
    fn load(&self) -> Result<RawConfig> {
        Err(kernel_setup_cli::domain::ConfigError::Settings {
            path: PathBuf::from("/etc/kernel-setup.yaml"),
            reason: "expected a mapping".to_string(),
        }
        .into())
    }

    fn path(&self) -> Option<PathBuf> {
        Some(PathBuf::from("/etc/kernel-setup.yaml"))
    }
}

// ── Mock: reporter ────────────────────────────────────────────────────────────

/// Captures progress messages.
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.messages.borrow_mut().push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.messages.borrow_mut().push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(format!("warn: {message}"));
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub const HOME: &str = "/global/homes/u/user";
pub const LAUNCHER: &str = "/global/homes/u/user/lsst-kernel.sh";
pub const DESCRIPTOR: &str = "/global/homes/u/user/.local/share/jupyter/kernels/lsst/kernel.json";

/// The example configuration from the Cori setup notes.
pub fn lsst_raw() -> RawConfig {
    RawConfig {
        home: Some(HOME.to_string()),
        kernel_name: Some("lsst".to_string()),
        remote_launcher: Some(LAUNCHER.to_string()),
        ..RawConfig::default()
    }
}
