//! Kernel artifact rendering: pure functions, no I/O.
//!
//! Each function takes a validated `Configuration` and returns the artifact
//! content. The caller is responsible for writing to disk.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::process`.

use std::sync::LazyLock;

use kernel_setup_common::{CONNECTION_FILE_FLAG, CONNECTION_FILE_TOKEN, KernelDescriptor};
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::config::Configuration;
use crate::domain::error::RenderError;

/// Fixed launcher template. `{{...}}` tokens are substituted; nothing else is.
pub const LAUNCHER_TEMPLATE: &str = "#!/bin/bash\n\
# Jupyter kernel launcher for '{{kernel_name}}'. Generated by kernel-setup.\n\
export HOME=\"{{home}}\"\n\
{{setup}}exec {{kernel_command}} \"$@\"\n";

/// Permission bits of the launcher script.
pub const LAUNCHER_MODE: u32 = 0o755;
/// Permission bits of `kernel.json`.
pub const DESCRIPTOR_MODE: u32 = 0o644;

/// Matches any `{{...}}` token left in rendered output.
pub static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"\{\{[^{}]*\}\}").expect("valid regex")
});

/// Rendered launcher script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LauncherScript {
    /// Where the script is meant to live on the cluster.
    pub path: String,
    pub content: String,
    /// Always `true`; the descriptor executes the script directly.
    pub executable: bool,
}

/// Render the launcher script.
///
/// # Errors
///
/// Returns `RenderError::UnresolvedPlaceholder` if a `{{...}}` token survives
/// substitution.
pub fn render_launcher(config: &Configuration) -> Result<LauncherScript, RenderError> {
    let setup: String = config
        .setup_commands()
        .iter()
        .map(|line| format!("{line}\n"))
        .collect();
    let content = substitute(
        LAUNCHER_TEMPLATE,
        &[
            ("kernel_name", config.kernel_name()),
            ("home", config.home_directory()),
            ("setup", &setup),
            ("kernel_command", config.kernel_command()),
        ],
    );
    ensure_resolved("launcher script", &content)?;
    Ok(LauncherScript {
        path: config.remote_launcher_path().to_string(),
        content,
        executable: true,
    })
}

/// Build the kernel descriptor. `{connection_file}` is copied verbatim.
#[must_use]
pub fn render_kernel_descriptor(config: &Configuration) -> KernelDescriptor {
    KernelDescriptor {
        argv: vec![
            config.remote_launcher_path().to_string(),
            CONNECTION_FILE_FLAG.to_string(),
            CONNECTION_FILE_TOKEN.to_string(),
        ],
        display_name: config.display_name().to_string(),
        language: config.language().to_string(),
        env: config.env().clone(),
    }
}

/// Serialize a descriptor to the exact bytes written to `kernel.json`.
///
/// # Errors
///
/// Returns `RenderError::Serialize` if JSON encoding fails.
pub fn serialize_descriptor(descriptor: &KernelDescriptor) -> Result<String, RenderError> {
    descriptor.to_json().map_err(RenderError::Serialize)
}

/// SHA-256 of artifact content, hex-encoded.
#[must_use]
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{{{key}}}}}"), value)
    })
}

fn ensure_resolved(artifact: &'static str, content: &str) -> Result<(), RenderError> {
    match PLACEHOLDER_RE.find(content) {
        Some(token) => Err(RenderError::UnresolvedPlaceholder {
            artifact,
            token: token.as_str().to_string(),
        }),
        None => Ok(()),
    }
}
