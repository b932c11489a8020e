//! High-level operations.
//!
//! This module contains the implementation of cgear commands. Each takes the
//! loaded [`Project`] and the collaborators it needs, and leaves printing of
//! results to the caller.

pub mod cgear_build;
pub mod cgear_clean;
pub mod cgear_count;
pub mod cgear_env;
pub mod cgear_install;
pub mod project;

pub use cgear_build::{build, run, BuildOptions, RunOptions};
pub use cgear_clean::clean;
pub use cgear_count::{count, LineCount};
pub use cgear_env::{
    set_build_type, set_generator, set_platform, set_toolchain, Discovery, EnvChange, EnvReport,
};
pub use cgear_install::{install, InstallOptions, PackageSource};
pub use cgear_test::{kebab, list_tests, run_test, TestOptions, TestProgram, TestSuite};
pub use project::Project;
