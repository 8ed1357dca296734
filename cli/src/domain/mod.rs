//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod verify;

pub use artifacts::{
    LauncherScript, content_digest, render_kernel_descriptor, render_launcher,
    serialize_descriptor,
};
pub use config::{ArtifactPaths, Configuration, RawConfig, validate};
pub use error::{ConfigError, Failure, RenderError, VerifyError, WriteError};
