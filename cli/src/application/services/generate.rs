//! Application service: the validate → render → write pipeline.
//!
//! Both artifacts are rendered before anything is written, so a render
//! failure never leaves one artifact updated and the other stale.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kernel_setup_common::KernelDescriptor;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::ports::{ArtifactWriter, ProgressReporter, WriteOptions, WriteOutcome};
use crate::domain::artifacts::{
    LauncherScript, content_digest, render_kernel_descriptor, render_launcher,
    serialize_descriptor,
};
use crate::domain::config::{ArtifactPaths, Configuration};

/// Which artifact a report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Launcher,
    Descriptor,
}

impl ArtifactKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Launcher => "launcher script",
            Self::Descriptor => "kernel descriptor",
        }
    }
}

/// Both artifacts, rendered and ready to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifacts {
    pub launcher: LauncherScript,
    pub descriptor: KernelDescriptor,
    /// Exact `kernel.json` bytes.
    pub descriptor_json: String,
}

/// One written artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub outcome: WriteOutcome,
    pub sha256: String,
}

/// Result of a `generate` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub kernel_name: String,
    pub argv: Vec<String>,
    pub artifacts: Vec<GeneratedArtifact>,
}

/// Render both artifacts for `config`.
///
/// # Errors
///
/// Returns a `RenderError` if the launcher template leaves a placeholder or
/// the descriptor cannot be serialized.
pub fn render_artifacts(config: &Configuration) -> Result<RenderedArtifacts> {
    let launcher = render_launcher(config)?;
    let descriptor = render_kernel_descriptor(config);
    let descriptor_json = serialize_descriptor(&descriptor)?;
    debug!(
        launcher_bytes = launcher.content.len(),
        descriptor_bytes = descriptor_json.len(),
        "artifacts rendered"
    );
    Ok(RenderedArtifacts {
        launcher,
        descriptor,
        descriptor_json,
    })
}

/// Render and write both artifacts.
///
/// # Errors
///
/// Returns a `RenderError` before any write, or the `WriteError` of the
/// first artifact that could not be written.
pub fn generate(
    writer: &impl ArtifactWriter,
    reporter: &impl ProgressReporter,
    config: &Configuration,
    paths: &ArtifactPaths,
    create_parents: bool,
) -> Result<GenerateReport> {
    reporter.step(&format!("Rendering kernel '{}'", config.kernel_name()));
    let rendered = render_artifacts(config)?;

    let launcher = write_artifact(
        writer,
        reporter,
        ArtifactKind::Launcher,
        &paths.launcher,
        &rendered.launcher.content,
        WriteOptions {
            executable: true,
            create_parents,
        },
    )?;
    let descriptor = write_artifact(
        writer,
        reporter,
        ArtifactKind::Descriptor,
        &paths.descriptor,
        &rendered.descriptor_json,
        WriteOptions {
            executable: false,
            create_parents,
        },
    )?;

    if paths.launcher != Path::new(config.remote_launcher_path()) {
        reporter.warn(&format!(
            "kernel.json launches {}; copy {} there before starting the kernel",
            config.remote_launcher_path(),
            paths.launcher.display()
        ));
    }

    Ok(GenerateReport {
        kernel_name: config.kernel_name().to_string(),
        argv: rendered.descriptor.argv,
        artifacts: vec![launcher, descriptor],
    })
}

fn write_artifact(
    writer: &impl ArtifactWriter,
    reporter: &impl ProgressReporter,
    kind: ArtifactKind,
    path: &Path,
    content: &str,
    options: WriteOptions,
) -> Result<GeneratedArtifact> {
    let outcome = writer
        .write(path, content, options)
        .with_context(|| format!("writing {}", kind.label()))?;
    info!(kind = kind.label(), path = %path.display(), ?outcome, "artifact written");
    match outcome {
        WriteOutcome::Unchanged => {
            reporter.success(&format!("{} up to date: {}", kind.label(), path.display()));
        }
        WriteOutcome::Created | WriteOutcome::Replaced => {
            reporter.success(&format!("Wrote {}: {}", kind.label(), path.display()));
        }
    }
    Ok(GeneratedArtifact {
        kind,
        path: path.to_path_buf(),
        outcome,
        sha256: content_digest(content),
    })
}
