//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Generate and verify Jupyter kernel launchers for cluster home directories
#[derive(Parser, Debug)]
#[command(
    name = "kernel-setup",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log filter for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Settings file [default: $KERNEL_SETUP_CONFIG or ~/.kernel-setup/config.yaml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the launcher script and kernel.json
    Generate(commands::generate::GenerateArgs),

    /// Print the launcher script and kernel.json without writing them
    Render(commands::KernelArgs),

    /// Check an existing launcher script and/or kernel.json
    Verify(commands::verify::VerifyArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails; `main` maps it to an exit code.
    pub fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            command,
            ..
        } = self;
        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            json,
            config,
        });
        match command {
            Command::Generate(args) => commands::generate::run(&app, &args),
            Command::Render(args) => commands::render::run(&app, &args),
            Command::Verify(args) => commands::verify::run(&app, &args),
            Command::Version => commands::version::run(&app),
        }
    }
}
