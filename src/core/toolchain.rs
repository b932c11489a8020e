//! The persisted toolchain record.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A C/C++ compiler pair.
///
/// For MSVC toolchains both fields hold the CMake toolset specification
/// (e.g. `v143,host=x64,version=14.44.35207`) rather than a binary path,
/// since MSVC is selected through `-T`/`-A` instead of compiler paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compiler {
    #[serde(rename = "C")]
    pub c: PathBuf,
    #[serde(rename = "CXX")]
    pub cxx: PathBuf,
}

/// A selectable toolchain: identity, compilers, and the MSVC flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Toolchain {
    /// Display name, e.g. `GCC 13.2.0 x86_64-w64-mingw32`.
    pub name: String,

    pub compiler: Compiler,

    /// Whether this is an MSVC toolchain (toolset/arch switches instead of paths).
    #[serde(default)]
    pub msvc: bool,

    /// Target triple for GCC/Clang, target architecture (`x64`/`x86`) for MSVC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Toolchain {
    /// A GCC/Clang-style toolchain with explicit compiler paths.
    pub fn new(
        name: impl Into<String>,
        c: impl Into<PathBuf>,
        cxx: impl Into<PathBuf>,
        target: Option<String>,
    ) -> Self {
        Toolchain {
            name: name.into(),
            compiler: Compiler {
                c: c.into(),
                cxx: cxx.into(),
            },
            msvc: false,
            target,
        }
    }

    /// An MSVC toolchain identified by its toolset specification.
    pub fn msvc(name: impl Into<String>, toolset: impl Into<String>, arch: impl Into<String>) -> Self {
        let toolset = PathBuf::from(toolset.into());
        Toolchain {
            name: name.into(),
            compiler: Compiler {
                c: toolset.clone(),
                cxx: toolset,
            },
            msvc: true,
            target: Some(arch.into()),
        }
    }

    /// The toolset specification passed to `-T` (MSVC only).
    pub fn toolset(&self) -> Option<String> {
        self.msvc
            .then(|| self.compiler.cxx.to_string_lossy().into_owned())
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
