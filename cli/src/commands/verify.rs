//! `kernel-setup verify`: check artifacts already on disk.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::verify;
use crate::domain::error::Failure;

/// Arguments for the verify command.
#[derive(Args, Debug)]
#[command(group = clap::ArgGroup::new("artifact").required(true).multiple(true))]
pub struct VerifyArgs {
    /// Launcher script to check
    #[arg(long, value_name = "PATH", group = "artifact")]
    pub launcher: Option<PathBuf>,

    /// kernel.json to check
    #[arg(long, value_name = "PATH", group = "artifact")]
    pub descriptor: Option<PathBuf>,
}

/// Run the verify command. Invalid artifacts are reported, not returned as
/// an error, so `--json` output stays a single document.
///
/// # Errors
///
/// Returns `VerifyError::Unreadable` if an artifact cannot be read.
pub fn run(app: &AppContext, args: &VerifyArgs) -> Result<ExitCode> {
    let report = verify::verify(
        &app.fs,
        args.launcher.as_deref(),
        args.descriptor.as_deref(),
    )?;
    app.renderer().render_verify(&report)?;
    if report.valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(Failure::Verification.exit_code()))
    }
}
