//! kernel-setup - Jupyter kernel launchers for cluster home directories

use std::process::ExitCode;

use clap::Parser;
use kernel_setup_cli::cli::Cli;
use kernel_setup_cli::domain::Failure;
use kernel_setup_cli::output::json;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let json_mode = cli.json;
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            let failure = Failure::classify(&e);
            tracing::debug!(error = ?e, "command failed");
            if json_mode && let Ok(obj) = json::format_error(&format!("{e:#}"), failure.code()) {
                println!("{obj}");
            } else {
                eprintln!("Error: {}: {e:#}", failure.stage());
            }
            ExitCode::from(failure.exit_code())
        }
    }
}
