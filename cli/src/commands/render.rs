//! `kernel-setup render`: print both artifacts without writing anything.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::{config_service, generate};
use crate::commands::KernelArgs;

/// Run the render command.
///
/// # Errors
///
/// Returns a `ConfigError` or `RenderError`.
pub fn run(app: &AppContext, args: &KernelArgs) -> Result<ExitCode> {
    let resolved = config_service::resolve(&app.settings, args.to_raw())?;
    let rendered = generate::render_artifacts(&resolved.config)?;
    app.renderer().render_preview(&rendered)?;
    Ok(ExitCode::SUCCESS)
}
