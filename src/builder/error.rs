//! Error types for discovery, configuration, and the build pipeline.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::builder::toolchain::CompilerFamily;
use crate::core::{Generator, Platform};

/// A compiler candidate that could not be turned into a toolchain.
///
/// These are logged and the candidate is dropped; they never abort a scan.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("{family} banner did not match the expected pattern")]
    NoMatch { family: CompilerFamily, raw: String },

    #[error("failed to run `{}`: {message}", program.display())]
    Spawn { program: PathBuf, message: String },

    #[error("invalid compiler version `{version}`")]
    InvalidVersion { version: String },
}

/// The selected settings cannot produce a valid configure invocation.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("no toolchain selected, run `cgear env toolchain` first")]
    NoToolchain,

    #[error("toolchain `{toolchain}` cannot be used with generator `{generator}`")]
    InvalidGenerator {
        toolchain: String,
        generator: Generator,
    },

    #[error(
        "toolchain `{toolchain}` targets `{target}` but platform `{platform}` was requested"
    )]
    InvalidPlatform {
        toolchain: String,
        target: String,
        platform: Platform,
    },

    #[error("build directory `{}` must be inside the project `{}`", build.display(), project.display())]
    BuildPathOutsideProject { build: PathBuf, project: PathBuf },
}

/// Which half of the pipeline a process error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configure,
    Build,
    Run,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Configure => "configure",
            Phase::Build => "build",
            Phase::Run => "run",
        })
    }
}

/// Failure of a configure, build, or run step.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("{phase} step failed ({}){}", exit_label(*code), output_suffix(output))]
    Process {
        phase: Phase,
        code: Option<i32>,
        output: String,
    },

    #[error("failed to start {phase} step: {message}")]
    Spawn { phase: Phase, message: String },

    #[error("filesystem error at `{}`", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("executable not found: {}", path.display())]
    MissingExecutable { path: PathBuf },
}

impl BuildError {
    /// The phase that failed, if the error came from a child process.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            BuildError::Process { phase, .. } | BuildError::Spawn { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {}", c),
        None => "terminated by signal".to_string(),
    }
}

fn output_suffix(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}
