//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator. Display strings never repeat their `#[source]`;
//! callers print the whole chain with `{:#}`.

use std::path::{Path, PathBuf};

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// User input that cannot become a `Configuration`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("missing {field}: pass --{field} or set `{key}` in the settings file")]
    Missing {
        field: &'static str,
        key: &'static str,
    },

    #[error("cannot load settings file {}: {reason}", path.display())]
    Settings { path: PathBuf, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

// ── Render errors ─────────────────────────────────────────────────────────────

/// Rendering produced output that violates the template contract.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unresolved placeholder {token} in rendered {artifact}")]
    UnresolvedPlaceholder {
        artifact: &'static str,
        token: String,
    },

    #[error("cannot serialize kernel descriptor")]
    Serialize(#[source] serde_json::Error),
}

// ── Write errors ──────────────────────────────────────────────────────────────

/// An artifact could not be written. The previous file, if any, is untouched.
#[derive(Debug, Error)]
#[error("cannot write {}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl WriteError {
    #[must_use]
    pub fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ── Verify errors ─────────────────────────────────────────────────────────────

/// An artifact on disk could not be inspected.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("cannot read {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to verify: pass --launcher and/or --descriptor")]
    NothingToVerify,
}

// ── Failure classification ────────────────────────────────────────────────────

/// Failure category of a whole invocation, derived from the error chain.
///
/// Each category maps to its own process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    InvalidConfig,
    Write,
    Template,
    Verification,
    Other,
}

impl Failure {
    /// Classify an error by the first typed domain error in its chain.
    #[must_use]
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.is::<ConfigError>() {
                return Self::InvalidConfig;
            }
            if cause.is::<WriteError>() {
                return Self::Write;
            }
            if cause.is::<RenderError>() {
                return Self::Template;
            }
            if cause.is::<VerifyError>() {
                return Self::Verification;
            }
        }
        Self::Other
    }

    /// Process exit code for this category.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::InvalidConfig | Self::Other => 1,
            Self::Write => 2,
            Self::Template => 3,
            Self::Verification => 4,
        }
    }

    /// Machine-readable code used in `--json` error objects.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::Write => "WRITE_FAILED",
            Self::Template => "TEMPLATE_SUBSTITUTION",
            Self::Verification => "VERIFICATION_FAILED",
            Self::Other => "INTERNAL",
        }
    }

    /// Pipeline stage named in the diagnostic line.
    #[must_use]
    pub fn stage(self) -> &'static str {
        match self {
            Self::InvalidConfig => "validate",
            Self::Write => "write",
            Self::Template => "render",
            Self::Verification => "verify",
            Self::Other => "internal",
        }
    }
}
