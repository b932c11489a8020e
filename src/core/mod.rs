//! Core data types shared by discovery, command synthesis, and configuration.

pub mod settings;
pub mod toolchain;

pub use settings::{BuildType, Generator, Platform, ProjectType, SettingParseError};
pub use toolchain::{Compiler, Toolchain};
