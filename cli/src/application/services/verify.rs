//! Application service: verify artifacts already on disk.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::application::ports::ArtifactReader;
use crate::application::services::generate::ArtifactKind;
use crate::domain::error::VerifyError;
use crate::domain::verify::{descriptor_issues, launcher_issues, launcher_mismatch};

/// Result of checking one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactCheck {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub issues: Vec<String>,
}

/// Result of a `verify` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub valid: bool,
    pub checks: Vec<ArtifactCheck>,
    /// Findings that do not make the artifacts invalid.
    pub warnings: Vec<String>,
}

impl VerifyReport {
    /// Total number of violations across all artifacts.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.checks.iter().map(|c| c.issues.len()).sum()
    }
}

/// Check the given artifacts. At least one path must be given.
///
/// # Errors
///
/// Returns `VerifyError::NothingToVerify` when both paths are `None` and
/// `VerifyError::Unreadable` when a file cannot be read.
pub fn verify(
    reader: &impl ArtifactReader,
    launcher: Option<&Path>,
    descriptor: Option<&Path>,
) -> Result<VerifyReport> {
    if launcher.is_none() && descriptor.is_none() {
        return Err(VerifyError::NothingToVerify.into());
    }

    let mut checks = Vec::new();
    let mut warnings = Vec::new();
    let mut parsed = None;

    if let Some(path) = descriptor {
        let file = reader.read(path)?;
        let (desc, issues) = descriptor_issues(&file.content);
        parsed = desc;
        checks.push(ArtifactCheck {
            kind: ArtifactKind::Descriptor,
            path: path.to_path_buf(),
            issues,
        });
    }

    if let Some(path) = launcher {
        let file = reader.read(path)?;
        checks.push(ArtifactCheck {
            kind: ArtifactKind::Launcher,
            path: path.to_path_buf(),
            issues: launcher_issues(&file.content, file.mode),
        });
        if let Some(desc) = &parsed
            && let Some(warning) = launcher_mismatch(desc, &path.to_string_lossy())
        {
            warnings.push(warning);
        }
    }

    for check in &checks {
        for issue in &check.issues {
            debug!(kind = check.kind.label(), path = %check.path.display(), issue = issue.as_str(), "artifact check failed");
        }
    }

    let valid = checks.iter().all(|c| c.issues.is_empty());
    debug!(valid, artifacts = checks.len(), "verification finished");
    Ok(VerifyReport {
        valid,
        checks,
        warnings,
    })
}
