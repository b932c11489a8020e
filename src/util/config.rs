//! Project configuration (`cgear.toml`).
//!
//! The file lives at the project root and records the current environment
//! selection: toolchain, platform, generator and build type. It also caches
//! the last toolchain discovery so `cgear env toolchain` doesn't rescan every time.
//!
//! ```toml
//! version = "0.1.0"
//! platform = "host"
//! generator = "Ninja"
//! build_type = "Debug"
//! project_type = "app"
//!
//! [toolchain]
//! name = "GCC 13.2.0 x86_64-linux-gnu"
//! msvc = false
//! target = "x86_64-linux-gnu"
//!
//! [toolchain.compiler]
//! C = "/usr/bin/gcc"
//! CXX = "/usr/bin/g++"
//!
//! [build]
//! build_dir = "build"
//! c_flags = ["-Wall"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{BuildType, Generator, Platform, ProjectType, Toolchain};

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "cgear.toml";

/// Persisted project state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Version of cgear that last wrote the file.
    pub version: String,

    pub platform: Platform,
    pub generator: Generator,
    pub build_type: BuildType,
    pub project_type: ProjectType,

    /// Project root, when it differs from the directory holding this file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,

    /// The current toolchain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<Toolchain>,

    /// Build settings
    pub build: BuildConfig,

    /// Result of the last toolchain discovery.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub toolchains: Vec<Toolchain>,
}

/// `[build]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build directory, relative to the project root.
    pub build_dir: PathBuf,

    /// Emit compile_commands.json
    pub export_compile_commands: bool,

    /// Pass --no-warn-unused-cli to cmake
    pub no_warn_unused_cli: bool,

    /// Extra C compiler flags
    pub c_flags: Vec<String>,

    /// Extra C++ compiler flags
    pub cxx_flags: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            build_dir: PathBuf::from("build"),
            export_compile_commands: true,
            no_warn_unused_cli: true,
            c_flags: Vec::new(),
            cxx_flags: Vec::new(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: Platform::default(),
            generator: Generator::default(),
            build_type: BuildType::default(),
            project_type: ProjectType::default(),
            project_path: None,
            toolchain: None,
            build: BuildConfig::default(),
            toolchains: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file doesn't exist.
    ///
    /// A file that exists but cannot be parsed is still an error: silently
    /// replacing it on the next save would lose the user's selection.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let mut to_write = self.clone();
        to_write.version = env!("CARGO_PKG_VERSION").to_string();

        let contents =
            toml::to_string_pretty(&to_write).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Absolute build directory for a project root.
    pub fn build_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.build.build_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::default();
        assert_eq!(config.platform, Platform::Host);
        assert_eq!(config.generator, Generator::Ninja);
        assert_eq!(config.build_type, BuildType::Debug);
        assert!(config.toolchain.is_none());
        assert_eq!(config.build.build_dir, PathBuf::from("build"));
        assert!(config.build.export_compile_commands);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ProjectConfig = toml::from_str(
            r#"
generator = "Unix Makefiles"
build_type = "Release"

[build]
c_flags = ["-Wall"]
"#,
        )
        .unwrap();

        assert_eq!(config.generator, Generator::UnixMakefiles);
        assert_eq!(config.build_type, BuildType::Release);
        assert_eq!(config.platform, Platform::Host);
        assert_eq!(config.build.c_flags, vec!["-Wall"]);
        assert!(config.build.no_warn_unused_cli);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);

        let gcc = Toolchain::new(
            "GCC 13.2.0 x86_64-linux-gnu",
            "/usr/bin/gcc",
            "/usr/bin/g++",
            Some("x86_64-linux-gnu".into()),
        );
        let msvc = Toolchain::msvc(
            "Visual Studio 2022 Release 14.44.35207 - amd64",
            "v143,host=x64,version=14.44.35207",
            "x64",
        );

        let config = ProjectConfig {
            platform: Platform::X64,
            generator: Generator::MinGwMakefiles,
            build_type: BuildType::MinSizeRel,
            project_type: ProjectType::Lib,
            toolchain: Some(gcc.clone()),
            toolchains: vec![gcc, msvc],
            ..ProjectConfig::default()
        };
        config.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("CXX = \"/usr/bin/g++\""));

        let loaded = ProjectConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = ProjectConfig::load_or_default(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "generator = \"Xcode\"\n").unwrap();
        assert!(ProjectConfig::load_or_default(&path).is_err());
    }
}
