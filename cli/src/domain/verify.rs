//! Structural checks for artifacts already on disk: pure, no I/O.
//!
//! Every check collects all violations instead of stopping at the first, so
//! a single `verify` run reports everything wrong with a file.

use kernel_setup_common::{CONNECTION_FILE_TOKEN, KernelDescriptor};

use crate::domain::artifacts::PLACEHOLDER_RE;

/// Check `kernel.json` text. Returns the parsed descriptor (if it parsed)
/// and the list of violations.
#[must_use]
pub fn descriptor_issues(text: &str) -> (Option<KernelDescriptor>, Vec<String>) {
    let desc = match KernelDescriptor::from_json(text) {
        Ok(desc) => desc,
        Err(e) => return (None, vec![format!("not a valid kernel descriptor: {e}")]),
    };

    let mut issues = Vec::new();
    match desc.executable() {
        None => issues.push("argv is empty".to_string()),
        Some(exe) if !exe.starts_with('/') => {
            issues.push(format!("argv[0] '{exe}' is not an absolute path"));
        }
        Some(_) => {}
    }
    if !desc.forwards_connection_file() {
        issues.push(format!("argv does not pass -f {CONNECTION_FILE_TOKEN}"));
    }
    if desc.display_name.trim().is_empty() {
        issues.push("display_name is empty".to_string());
    }
    if desc.language.trim().is_empty() {
        issues.push("language is empty".to_string());
    }
    (Some(desc), issues)
}

/// Check launcher script text. `mode` is the file's permission bits, or
/// `None` where the platform has no executable bit.
#[must_use]
pub fn launcher_issues(text: &str, mode: Option<u32>) -> Vec<String> {
    let mut issues = Vec::new();
    if !text.starts_with("#!") {
        issues.push("missing #! shebang line".to_string());
    }
    let forwards = text
        .lines()
        .map(str::trim)
        .any(|line| line.starts_with("exec ") && line.contains("\"$@\""));
    if !forwards {
        issues.push("no `exec ... \"$@\"` line forwarding kernel arguments".to_string());
    }
    if let Some(token) = PLACEHOLDER_RE.find(text) {
        issues.push(format!("unresolved placeholder {}", token.as_str()));
    }
    if let Some(mode) = mode
        && mode & 0o111 == 0
    {
        issues.push(format!("not executable (mode {:o})", mode & 0o777));
    }
    issues
}

/// Warning when the descriptor launches something other than `launcher`.
///
/// Not a failure: the descriptor normally names the remote path while the
/// launcher was checked from a local copy.
#[must_use]
pub fn launcher_mismatch(descriptor: &KernelDescriptor, launcher: &str) -> Option<String> {
    match descriptor.executable() {
        Some(exe) if exe != launcher => Some(format!(
            "descriptor launches '{exe}' but the launcher checked is '{launcher}'"
        )),
        _ => None,
    }
}
