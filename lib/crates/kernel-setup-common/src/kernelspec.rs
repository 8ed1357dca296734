// lib/crates/kernel-setup-common/src/kernelspec.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder the notebook server replaces with the connection file path.
/// Never substituted by kernel-setup.
pub const CONNECTION_FILE_TOKEN: &str = "{connection_file}";

/// Flag that precedes [`CONNECTION_FILE_TOKEN`] in `argv`.
pub const CONNECTION_FILE_FLAG: &str = "-f";

/// File name Jupyter looks for inside a kernel directory.
pub const DESCRIPTOR_FILE_NAME: &str = "kernel.json";

/// Jupyter kernel descriptor (`kernel.json`).
///
/// See <https://jupyter-client.readthedocs.io/en/stable/kernels.html#kernel-specs>.
/// Keys Jupyter understands but kernel-setup never writes (`metadata`,
/// `interrupt_mode`) are ignored when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelDescriptor {
    /// Command line used to start the kernel. The first element is the
    /// executable.
    pub argv: Vec<String>,
    /// Name shown in the notebook kernel picker.
    pub display_name: String,
    /// Kernel language, e.g. `python`.
    pub language: String,
    /// Extra environment for the kernel process.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl KernelDescriptor {
    /// Returns the executable the descriptor launches, if `argv` is non-empty.
    #[must_use]
    pub fn executable(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Returns `true` when `argv` forwards the connection file as
    /// `-f {connection_file}`.
    #[must_use]
    pub fn forwards_connection_file(&self) -> bool {
        self.argv
            .windows(2)
            .any(|pair| pair[0] == CONNECTION_FILE_FLAG && pair[1] == CONNECTION_FILE_TOKEN)
    }

    /// Serialize as pretty-printed JSON with a trailing newline.
    ///
    /// Key order follows the struct and `env` is sorted, so the output is
    /// stable across runs.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Parse a descriptor from `kernel.json` text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Per-user kernel directory for `name` under `home`:
/// `<home>/.local/share/jupyter/kernels/<name>`.
#[must_use]
pub fn user_kernel_dir(home: &Path, name: &str) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("jupyter")
        .join("kernels")
        .join(name)
}
