//! cgear - A build wrapper for CMake C/C++ projects
//!
//! This crate provides the library behind the `cgear` binary: compiler
//! toolchain discovery, CMake argument synthesis, and the configure, build,
//! run and install pipeline.

pub mod builder;
pub mod core;
pub mod ops;
pub mod ui;
pub mod util;

/// Test utilities and mocks for cgear unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a scripted process executor and selector.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildError, BuildOrchestrator, ConfigurationError, ToolchainRegistry};
pub use core::{BuildType, Generator, Platform, ProjectType, Toolchain};
pub use util::context::GlobalContext;
