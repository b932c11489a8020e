//! Project environment settings: platform, generator, build type, project type.
//!
//! Each setting has a fixed set of values that the `env` command offers for
//! selection, a stable serialized form for `cgear.toml`, and a lenient
//! `FromStr` for command-line input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a setting value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}', valid values: {expected}")]
pub struct SettingParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl SettingParseError {
    fn new<T: fmt::Display>(kind: &'static str, value: &str, all: &[T]) -> Self {
        SettingParseError {
            kind,
            value: value.to_string(),
            expected: all
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Target word size for the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Whatever the selected compiler targets by default.
    #[default]
    Host,
    /// 32-bit x86
    #[serde(alias = "win32", alias = "i686")]
    X86,
    /// 64-bit x86
    #[serde(alias = "amd64", alias = "x86_64")]
    X64,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Host, Platform::X86, Platform::X64];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Host => "host",
            Platform::X86 => "x86",
            Platform::X64 => "x64",
        }
    }

    /// The `-A` value the Visual Studio generators expect.
    pub fn msvc_arch(&self) -> Option<&'static str> {
        match self {
            Platform::Host => None,
            Platform::X86 => Some("Win32"),
            Platform::X64 => Some("x64"),
        }
    }

    /// Compiler/linker flag forcing this word size on GCC-style drivers.
    pub fn word_size_flag(&self) -> Option<&'static str> {
        match self {
            Platform::Host => None,
            Platform::X86 => Some("-m32"),
            Platform::X64 => Some("-m64"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "host" | "native" => Ok(Platform::Host),
            "x86" | "win32" | "i686" => Ok(Platform::X86),
            "x64" | "amd64" | "x86_64" => Ok(Platform::X64),
            _ => Err(SettingParseError::new("platform", s, &Platform::ALL)),
        }
    }
}

/// CMake generator producing the native build files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Generator {
    #[default]
    #[serde(rename = "Ninja")]
    Ninja,
    #[serde(rename = "Unix Makefiles")]
    UnixMakefiles,
    #[serde(rename = "MinGW Makefiles")]
    MinGwMakefiles,
    #[serde(rename = "Visual Studio 17 2022")]
    VisualStudio2022,
    #[serde(rename = "Visual Studio 16 2019")]
    VisualStudio2019,
}

impl Generator {
    pub const ALL: [Generator; 5] = [
        Generator::Ninja,
        Generator::UnixMakefiles,
        Generator::MinGwMakefiles,
        Generator::VisualStudio2022,
        Generator::VisualStudio2019,
    ];

    /// The name CMake knows this generator by.
    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::Ninja => "Ninja",
            Generator::UnixMakefiles => "Unix Makefiles",
            Generator::MinGwMakefiles => "MinGW Makefiles",
            Generator::VisualStudio2022 => "Visual Studio 17 2022",
            Generator::VisualStudio2019 => "Visual Studio 16 2019",
        }
    }

    /// Visual Studio solutions pick the configuration at build time.
    pub fn is_multi_config(&self) -> bool {
        matches!(
            self,
            Generator::VisualStudio2022 | Generator::VisualStudio2019
        )
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Generator {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Generator::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_ascii_lowercase().as_str() {
                "make" | "unix" => Some(Generator::UnixMakefiles),
                "mingw" => Some(Generator::MinGwMakefiles),
                "vs2022" | "vs" => Some(Generator::VisualStudio2022),
                "vs2019" => Some(Generator::VisualStudio2019),
                _ => None,
            })
            .ok_or_else(|| SettingParseError::new("generator", s, &Generator::ALL))
    }
}

/// CMake build type / configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub const ALL: [BuildType; 4] = [
        BuildType::Debug,
        BuildType::Release,
        BuildType::RelWithDebInfo,
        BuildType::MinSizeRel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = SettingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildType::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SettingParseError::new("build type", s, &BuildType::ALL))
    }
}

/// Kind of project the scaffolding created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    App,
    Lib,
    Qt,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::App => "app",
            ProjectType::Lib => "lib",
            ProjectType::Qt => "qt",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
