//! Toolchain discovery and the CMake build pipeline.
//!
//! Discovery lives in [`toolchain`], argument synthesis in [`cmake`], and
//! process orchestration in [`orchestrator`] and [`install`].

pub mod cmake;
pub mod error;
pub mod install;
pub mod orchestrator;
pub mod toolchain;

pub use cmake::{build_command, configure_command, BuildArgs, ConfigureArgs};
pub use error::{BuildError, ConfigurationError, DiscoveryError, Phase};
pub use install::DependencyInstaller;
pub use orchestrator::{BuildOptions, BuildOrchestrator, BuildState, RunArgs};
pub use toolchain::ToolchainRegistry;
