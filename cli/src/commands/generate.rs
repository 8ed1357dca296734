//! `kernel-setup generate`: write the launcher script and kernel.json.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::{config_service, generate};
use crate::commands::KernelArgs;
use crate::output::TerminalReporter;

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub kernel: KernelArgs,

    /// Create missing parent directories of the output paths
    #[arg(long)]
    pub parents: bool,
}

/// Run the generate command.
///
/// # Errors
///
/// Returns a `ConfigError`, `RenderError` or `WriteError` from the pipeline.
pub fn run(app: &AppContext, args: &GenerateArgs) -> Result<ExitCode> {
    let resolved = config_service::resolve(&app.settings, args.kernel.to_raw())?;
    let reporter = TerminalReporter::new(&app.output);
    let report = generate::generate(
        &app.fs,
        &reporter,
        &resolved.config,
        &resolved.paths,
        args.parents,
    )?;
    app.renderer().render_generate(&report)?;
    Ok(ExitCode::SUCCESS)
}
