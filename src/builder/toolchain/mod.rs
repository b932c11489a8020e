//! Toolchain discovery.
//!
//! Discovery runs in three steps:
//! 1. [`scan`] walks the search path for known compiler drivers
//! 2. [`parse`] runs each driver with `-v` and extracts version and target
//! 3. [`msvc`] asks `vswhere` for Visual Studio installations (Windows)
//!
//! [`registry`] combines the results into the list the user picks from.

use std::fmt;
use std::path::PathBuf;

pub mod msvc;
pub mod parse;
pub mod registry;
pub mod scan;

pub use msvc::MsvcDiscoverer;
pub use parse::{probe_candidate, BannerParser, CompilerInfoParser};
pub use registry::ToolchainRegistry;
pub use scan::ToolchainScanner;

/// Compiler families the scanner knows how to find and identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerFamily {
    Clang,
    ClangCl,
    Gcc,
}

impl CompilerFamily {
    /// Families in probe order.
    pub const ALL: [CompilerFamily; 3] = [
        CompilerFamily::Clang,
        CompilerFamily::ClangCl,
        CompilerFamily::Gcc,
    ];

    /// Base name of the C driver, without executable suffix.
    pub fn c_binary(&self) -> &'static str {
        match self {
            CompilerFamily::Clang => "clang",
            CompilerFamily::ClangCl => "clang-cl",
            CompilerFamily::Gcc => "gcc",
        }
    }

    /// Base name of the C++ driver, without executable suffix.
    pub fn cxx_binary(&self) -> &'static str {
        match self {
            CompilerFamily::Clang => "clang++",
            CompilerFamily::ClangCl => "clang-cl",
            CompilerFamily::Gcc => "g++",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CompilerFamily::Clang => "Clang",
            CompilerFamily::ClangCl => "Clang-cl",
            CompilerFamily::Gcc => "GCC",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A compiler pair found on disk, not yet identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCompiler {
    pub family: CompilerFamily,
    pub c_path: PathBuf,
    pub cxx_path: PathBuf,
}

/// What a compiler's version banner told us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub family: CompilerFamily,
    pub version: semver::Version,
    pub target: String,
}

impl Metadata {
    /// Display name used to identify the toolchain, e.g. `GCC 13.2.0 x86_64-linux-gnu`.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.family, self.version, self.target)
    }
}
