//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::domain::{RawConfig, VerifyError, WriteError};

// ── Value Types ───────────────────────────────────────────────────────────────

/// How an artifact should land on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Mark the file executable (`0o755` instead of `0o644`).
    pub executable: bool,
    /// Create missing parent directories before writing.
    pub create_parents: bool,
}

/// What a write did to the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    /// The target did not exist.
    Created,
    /// The target existed with different content or permissions.
    Replaced,
    /// The target already held identical content; nothing was written.
    Unchanged,
}

/// An artifact read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub content: String,
    /// Permission bits, or `None` on platforms without them.
    pub mode: Option<u32>,
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Writes artifacts so readers see either the old file or the new one.
pub trait ArtifactWriter {
    /// Create or replace `path` with `content`.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` if the directory is missing or not writable. On
    /// error the previous contents of `path` are unchanged.
    fn write(
        &self,
        path: &Path,
        content: &str,
        options: WriteOptions,
    ) -> Result<WriteOutcome, WriteError>;
}

/// Reads artifacts for verification.
pub trait ArtifactReader {
    /// Read `path` as UTF-8 text along with its permission bits.
    ///
    /// # Errors
    ///
    /// Returns `VerifyError::Unreadable` if the file cannot be read.
    fn read(&self, path: &Path) -> Result<ArtifactFile, VerifyError>;
}

// ── Settings Port ─────────────────────────────────────────────────────────────

/// Abstracts the optional settings file.
pub trait SettingsStore {
    /// Load settings, returning defaults when no settings file applies.
    fn load(&self) -> Result<RawConfig>;
    /// Path the store reads from, if one could be determined.
    fn path(&self) -> Option<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
