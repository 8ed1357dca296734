//! Unit tests for the kernel-setup CLI
//!
//! These tests use in-memory ports and run fast without touching the disk.

mod config_service;
mod generate_service;
mod mocks;
mod verify_service;
