//! Unit tests for the generate service using the in-memory filesystem.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use kernel_setup_cli::application::ports::WriteOutcome;
use kernel_setup_cli::application::services::generate::{ArtifactKind, GenerateReport, generate};
use kernel_setup_cli::domain::{ArtifactPaths, Failure, RawConfig, validate};
use kernel_setup_common::KernelDescriptor;

use crate::mocks::{DESCRIPTOR, LAUNCHER, MemoryFs, RecordingReporter, lsst_raw};

fn run(fs: &MemoryFs, raw: &RawConfig) -> anyhow::Result<GenerateReport> {
    let config = validate(raw).expect("valid config");
    let paths = ArtifactPaths::resolve(raw, &config);
    generate(fs, &RecordingReporter::default(), &config, &paths, false)
}

#[test]
fn test_generate_writes_both_artifacts_to_default_paths() {
    let fs = MemoryFs::default();
    let report = run(&fs, &lsst_raw()).unwrap();

    assert_eq!(report.kernel_name, "lsst");
    assert_eq!(report.artifacts.len(), 2);
    assert_eq!(report.artifacts[0].kind, ArtifactKind::Launcher);
    assert_eq!(report.artifacts[0].path, PathBuf::from(LAUNCHER));
    assert_eq!(report.artifacts[1].kind, ArtifactKind::Descriptor);
    assert_eq!(report.artifacts[1].path, PathBuf::from(DESCRIPTOR));
    assert!(fs.content(LAUNCHER).unwrap().contains("/global/homes/u/user"));
}

#[test]
fn test_generate_launcher_is_executable_descriptor_is_not() {
    let fs = MemoryFs::default();
    run(&fs, &lsst_raw()).unwrap();
    let files = fs.files.borrow();
    assert!(files[&PathBuf::from(LAUNCHER)].1.executable);
    assert!(!files[&PathBuf::from(DESCRIPTOR)].1.executable);
}

#[test]
fn test_generate_descriptor_round_trips() {
    let fs = MemoryFs::default();
    let report = run(&fs, &lsst_raw()).unwrap();
    let written = fs.content(DESCRIPTOR).unwrap();
    let parsed = KernelDescriptor::from_json(&written).unwrap();
    assert_eq!(parsed.argv, report.argv);
    assert_eq!(parsed.argv, vec![LAUNCHER, "-f", "{connection_file}"]);
}

#[test]
fn test_generate_twice_is_idempotent() {
    let fs = MemoryFs::default();
    let first = run(&fs, &lsst_raw()).unwrap();
    let launcher = fs.content(LAUNCHER).unwrap();
    let descriptor = fs.content(DESCRIPTOR).unwrap();

    let second = run(&fs, &lsst_raw()).unwrap();
    assert_eq!(fs.content(LAUNCHER).unwrap(), launcher);
    assert_eq!(fs.content(DESCRIPTOR).unwrap(), descriptor);
    assert!(
        second
            .artifacts
            .iter()
            .all(|a| a.outcome == WriteOutcome::Unchanged)
    );
    assert_eq!(first.artifacts[0].sha256, second.artifacts[0].sha256);
}

#[test]
fn test_generate_write_failure_stops_pipeline() {
    let fs = MemoryFs {
        read_only: vec![PathBuf::from(LAUNCHER)],
        ..MemoryFs::default()
    };
    let err = run(&fs, &lsst_raw()).unwrap_err();
    assert_eq!(Failure::classify(&err), Failure::Write);
    assert!(format!("{err:#}").contains("launcher script"), "got: {err:#}");
    assert!(fs.writes.borrow().is_empty(), "descriptor must not be written");
}

#[test]
fn test_generate_reports_progress() {
    let fs = MemoryFs::default();
    let reporter = RecordingReporter::default();
    let raw = lsst_raw();
    let config = validate(&raw).unwrap();
    let paths = ArtifactPaths::resolve(&raw, &config);
    generate(&fs, &reporter, &config, &paths, false).unwrap();

    let messages = reporter.messages.borrow();
    assert_eq!(messages[0], "step: Rendering kernel 'lsst'");
    assert!(messages.iter().any(|m| m.starts_with("success: Wrote launcher script")));
    assert!(messages.iter().any(|m| m.starts_with("success: Wrote kernel descriptor")));
}

#[test]
fn test_generate_custom_outputs_keep_remote_argv() {
    let fs = MemoryFs::default();
    let mut raw = lsst_raw();
    raw.launcher_out = Some("/tmp/stage/lsst-kernel.sh".to_string());
    raw.descriptor_out = Some("/tmp/stage/kernel.json".to_string());
    let report = run(&fs, &raw).unwrap();
    assert_eq!(report.argv[0], LAUNCHER);
    assert!(fs.content("/tmp/stage/kernel.json").is_some());
    assert!(fs.content(LAUNCHER).is_none());
}

#[test]
fn test_generate_warns_when_launcher_written_away_from_remote_path() {
    let fs = MemoryFs::default();
    let reporter = RecordingReporter::default();
    let mut raw = lsst_raw();
    raw.launcher_out = Some("/tmp/stage/lsst-kernel.sh".to_string());
    let config = validate(&raw).unwrap();
    let paths = ArtifactPaths::resolve(&raw, &config);
    generate(&fs, &reporter, &config, &paths, false).unwrap();

    let messages = reporter.messages.borrow();
    let warning = messages
        .iter()
        .find(|m| m.starts_with("warn: "))
        .expect("a copy warning");
    assert!(warning.contains(LAUNCHER), "got: {warning}");
    assert!(warning.contains("/tmp/stage/lsst-kernel.sh"), "got: {warning}");
}

#[test]
fn test_generate_default_paths_do_not_warn() {
    let fs = MemoryFs::default();
    let reporter = RecordingReporter::default();
    let raw = lsst_raw();
    let config = validate(&raw).unwrap();
    let paths = ArtifactPaths::resolve(&raw, &config);
    generate(&fs, &reporter, &config, &paths, false).unwrap();
    assert!(!reporter.messages.borrow().iter().any(|m| m.starts_with("warn: ")));
}
