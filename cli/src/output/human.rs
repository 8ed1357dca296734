//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::ports::WriteOutcome;
use crate::application::services::generate::{GenerateReport, RenderedArtifacts};
use crate::application::services::verify::VerifyReport;
use crate::output::OutputContext;

/// Renders command results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version. Printed even in quiet mode.
    pub fn render_version(&self, version: &str) {
        println!("kernel-setup {version}");
    }

    /// Render the summary of a `generate` run.
    pub fn render_generate(&self, report: &GenerateReport) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx
            .header(&format!("Kernel '{}' ready", report.kernel_name));
        for artifact in &report.artifacts {
            let state = match artifact.outcome {
                WriteOutcome::Created => "created",
                WriteOutcome::Replaced => "replaced",
                WriteOutcome::Unchanged => "unchanged",
            };
            self.ctx.kv(
                &format!("{:<18}", format!("{}:", artifact.kind.label())),
                &format!("{} ({state})", artifact.path.display()),
            );
        }
        self.ctx.kv(&format!("{:<18}", "argv:"), &report.argv.join(" "));
        println!();
        self.ctx
            .info("Restart the notebook server or reload the kernel list to pick it up.");
    }

    /// Print both artifacts. Contents are printed even in quiet mode so the
    /// output can be piped.
    pub fn render_preview(&self, rendered: &RenderedArtifacts) {
        self.ctx.header(&format!(
            "# launcher script ({})",
            rendered.launcher.path
        ));
        print!("{}", rendered.launcher.content);
        if !self.ctx.quiet {
            println!();
        }
        self.ctx.header("# kernel.json");
        print!("{}", rendered.descriptor_json);
    }

    /// Render the findings of a `verify` run.
    pub fn render_verify(&self, report: &VerifyReport) {
        for check in &report.checks {
            let label = format!("{} {}", check.kind.label(), check.path.display());
            if check.issues.is_empty() {
                self.ctx.success(&format!("{label} is valid"));
                continue;
            }
            self.ctx.error(&format!("{label} is invalid:"));
            for issue in &check.issues {
                eprintln!("      {}", issue.style(self.ctx.styles.dim));
            }
        }
        for warning in &report.warnings {
            self.ctx.warn(warning);
        }
        if !report.valid {
            self.ctx.error(&format!(
                "{} issue(s) found",
                report.issue_count().style(self.ctx.styles.bold)
            ));
        }
    }
}
