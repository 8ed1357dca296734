//! Unit tests for the verify service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use kernel_setup_cli::application::services::verify::verify;
use kernel_setup_cli::domain::{ArtifactPaths, Failure, validate};

use crate::mocks::{DESCRIPTOR, LAUNCHER, MemoryFs, RecordingReporter, lsst_raw};

fn generated_fs() -> MemoryFs {
    let fs = MemoryFs::default();
    let raw = lsst_raw();
    let config = validate(&raw).unwrap();
    let paths = ArtifactPaths::resolve(&raw, &config);
    kernel_setup_cli::application::services::generate::generate(
        &fs,
        &RecordingReporter::default(),
        &config,
        &paths,
        false,
    )
    .unwrap();
    fs
}

#[test]
fn test_generated_artifacts_verify_clean() {
    let fs = generated_fs();
    let report = verify(&fs, Some(Path::new(LAUNCHER)), Some(Path::new(DESCRIPTOR))).unwrap();
    assert!(report.valid, "got: {report:?}");
    assert_eq!(report.checks.len(), 2);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_non_executable_launcher_is_invalid() {
    let fs = generated_fs();
    let content = fs.content(LAUNCHER).unwrap();
    fs.insert(LAUNCHER, &content, false);
    let report = verify(&fs, Some(Path::new(LAUNCHER)), None).unwrap();
    assert!(!report.valid);
    assert_eq!(report.issue_count(), 1);
}

#[test]
fn test_broken_descriptor_is_invalid() {
    let fs = MemoryFs::default();
    fs.insert("/k/kernel.json", r#"{"argv": [], "display_name": "x", "language": "python"}"#, false);
    let report = verify(&fs, None, Some(Path::new("/k/kernel.json"))).unwrap();
    assert!(!report.valid);
    assert!(report.checks[0].issues.iter().any(|i| i == "argv is empty"));
}

#[test]
fn test_local_launcher_copy_warns_about_path_mismatch() {
    let fs = generated_fs();
    let content = fs.content(LAUNCHER).unwrap();
    fs.insert("/tmp/copy/lsst-kernel.sh", &content, true);
    let report = verify(
        &fs,
        Some(Path::new("/tmp/copy/lsst-kernel.sh")),
        Some(Path::new(DESCRIPTOR)),
    )
    .unwrap();
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_missing_file_is_verification_failure() {
    let fs = MemoryFs::default();
    let err = verify(&fs, Some(Path::new("/nope.sh")), None).unwrap_err();
    assert_eq!(Failure::classify(&err), Failure::Verification);
}

#[test]
fn test_nothing_to_verify_is_error() {
    let fs = MemoryFs::default();
    assert!(verify(&fs, None, None).is_err());
}
