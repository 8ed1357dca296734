//! Command implementations

pub mod generate;
pub mod render;
pub mod verify;
pub mod version;

use clap::Args;

use crate::domain::config::RawConfig;

/// Kernel settings accepted by `generate` and `render`.
///
/// Every flag is optional here; values missing from both the flags and the
/// settings file are reported by validation.
#[derive(Args, Debug, Default)]
pub struct KernelArgs {
    /// Home directory on the cluster (absolute path)
    #[arg(long, value_name = "PATH")]
    pub home: Option<String>,

    /// Kernel name ([A-Za-z0-9_-]+)
    #[arg(long, value_name = "NAME")]
    pub kernel_name: Option<String>,

    /// Where to write the launcher script [default: <home>/<kernel-name>-kernel.sh]
    #[arg(long, value_name = "PATH")]
    pub launcher_out: Option<String>,

    /// Where to write kernel.json
    /// [default: <home>/.local/share/jupyter/kernels/<kernel-name>/kernel.json]
    #[arg(long, value_name = "PATH")]
    pub descriptor_out: Option<String>,

    /// Launcher path as seen by the notebook server [default: --launcher-out]
    #[arg(long, value_name = "PATH")]
    pub remote_launcher: Option<String>,

    /// Name shown in the kernel picker [default: --kernel-name]
    #[arg(long)]
    pub display_name: Option<String>,

    /// Kernel language [default: python]
    #[arg(long)]
    pub language: Option<String>,

    /// Shell line to run before the kernel starts (repeatable)
    #[arg(long = "setup", value_name = "CMD")]
    pub setup: Vec<String>,

    /// Command that starts the kernel [default: python -m ipykernel]
    #[arg(long, value_name = "CMD")]
    pub kernel_command: Option<String>,

    /// Environment variable for the kernel process (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,
}

impl KernelArgs {
    /// Flag values as a `RawConfig` overlay.
    #[must_use]
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            home: self.home.clone(),
            kernel_name: self.kernel_name.clone(),
            remote_launcher: self.remote_launcher.clone(),
            launcher_out: self.launcher_out.clone(),
            descriptor_out: self.descriptor_out.clone(),
            display_name: self.display_name.clone(),
            language: self.language.clone(),
            setup: self.setup.clone(),
            kernel_command: self.kernel_command.clone(),
            env: self.env.iter().cloned().collect(),
        }
    }
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
