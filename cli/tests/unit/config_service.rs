//! Unit tests for settings resolution.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use kernel_setup_cli::application::services::config_service::resolve;
use kernel_setup_cli::domain::{Failure, RawConfig};

use crate::mocks::{BrokenSettings, FixedSettings, HOME, lsst_raw};

#[test]
fn test_flags_alone_resolve() {
    let resolved = resolve(&FixedSettings::default(), lsst_raw()).unwrap();
    assert_eq!(resolved.config.kernel_name(), "lsst");
}

#[test]
fn test_settings_supply_missing_flags() {
    let settings = FixedSettings(RawConfig {
        home: Some(HOME.to_string()),
        setup: vec!["module load python/3.5-anaconda".to_string()],
        ..RawConfig::default()
    });
    let flags = RawConfig {
        kernel_name: Some("desc".to_string()),
        ..RawConfig::default()
    };
    let resolved = resolve(&settings, flags).unwrap();
    assert_eq!(resolved.config.home_directory(), HOME);
    assert_eq!(resolved.config.setup_commands().len(), 1);
    assert_eq!(
        resolved.paths.launcher,
        PathBuf::from("/global/homes/u/user/desc-kernel.sh")
    );
}

#[test]
fn test_flags_override_settings() {
    let settings = FixedSettings(lsst_raw());
    let flags = RawConfig {
        display_name: Some("LSST (sims)".to_string()),
        ..RawConfig::default()
    };
    let resolved = resolve(&settings, flags).unwrap();
    assert_eq!(resolved.config.display_name(), "LSST (sims)");
}

#[test]
fn test_invalid_merged_input_is_config_failure() {
    let mut flags = lsst_raw();
    flags.kernel_name = Some("lsst/../x".to_string());
    let err = resolve(&FixedSettings::default(), flags).unwrap_err();
    assert_eq!(Failure::classify(&err), Failure::InvalidConfig);
    assert!(err.to_string().contains("kernel-name"), "got: {err}");
}

#[test]
fn test_broken_settings_file_is_config_failure() {
    let err = resolve(&BrokenSettings, lsst_raw()).unwrap_err();
    assert_eq!(Failure::classify(&err), Failure::InvalidConfig);
}
