//! CMake argument synthesis for the configure and build phases.
//!
//! Both builders are pure: the same record always yields the same
//! argument list, in the same order.

use std::path::{Path, PathBuf};

use crate::builder::error::ConfigurationError;
use crate::core::{BuildType, Generator, Platform, Toolchain};
use crate::util::fs::is_inside;

/// Project-local directory for files cgear generates.
pub const CGEAR_DIR: &str = ".cgear";

/// Everything the configure phase needs.
#[derive(Debug, Clone)]
pub struct ConfigureArgs {
    pub toolchain: Toolchain,
    pub platform: Platform,
    pub generator: Generator,
    pub build_type: BuildType,
    pub project_path: PathBuf,
    pub build_path: PathBuf,
    pub no_warn_unused_cli: bool,
    pub export_compile_commands: bool,
    pub c_flags: Vec<String>,
    pub cxx_flags: Vec<String>,
    pub install_prefix: Option<PathBuf>,
}

impl ConfigureArgs {
    /// Defaults for a project: host platform, Ninja, Debug, `<project>/build`.
    pub fn new(toolchain: Toolchain, project_path: impl Into<PathBuf>) -> Self {
        let project_path = project_path.into();
        ConfigureArgs {
            toolchain,
            platform: Platform::Host,
            generator: Generator::Ninja,
            build_type: BuildType::Debug,
            build_path: project_path.join("build"),
            project_path,
            no_warn_unused_cli: true,
            export_compile_commands: true,
            c_flags: Vec::new(),
            cxx_flags: Vec::new(),
            install_prefix: None,
        }
    }

    /// Reject combinations CMake would fail on, before anything is spawned.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let tc = &self.toolchain;

        if tc.msvc != self.generator.is_multi_config() {
            return Err(ConfigurationError::InvalidGenerator {
                toolchain: tc.name.clone(),
                generator: self.generator,
            });
        }

        if tc.msvc && self.platform != Platform::Host {
            if let Some(ref target) = tc.target {
                if target != self.platform.as_str() {
                    return Err(ConfigurationError::InvalidPlatform {
                        toolchain: tc.name.clone(),
                        target: target.clone(),
                        platform: self.platform,
                    });
                }
            }
        }

        if !is_inside(&self.build_path, &self.project_path) {
            return Err(ConfigurationError::BuildPathOutsideProject {
                build: self.build_path.clone(),
                project: self.project_path.clone(),
            });
        }

        Ok(())
    }

    /// Path of the word-size toolchain file, if this configuration needs one.
    ///
    /// MSVC selects the architecture with `-A`, and `Host` needs nothing.
    pub fn toolchain_file(&self) -> Option<PathBuf> {
        if self.toolchain.msvc {
            return None;
        }
        match self.platform {
            Platform::Host => None,
            p => Some(toolchain_file_path(&self.project_path, p)),
        }
    }

    /// The `-A` value for MSVC.
    fn msvc_arch(&self) -> &'static str {
        self.platform.msvc_arch().unwrap_or(
            match self.toolchain.target.as_deref() {
                Some("x86") => "Win32",
                _ => "x64",
            },
        )
    }
}

/// Everything the build phase needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArgs {
    pub build_path: PathBuf,
    pub target: Option<String>,
    pub build_type: BuildType,
    pub msvc: bool,
}

impl BuildArgs {
    /// Build args matching a configuration.
    pub fn for_config(config: &ConfigureArgs, target: Option<String>) -> Self {
        BuildArgs {
            build_path: config.build_path.clone(),
            target,
            build_type: config.build_type,
            msvc: config.toolchain.msvc,
        }
    }
}

/// Arguments for `cmake` in the configure phase.
pub fn configure_command(args: &ConfigureArgs) -> Vec<String> {
    let mut cmd = vec![format!("-G{}", args.generator)];

    if args.toolchain.msvc {
        if let Some(toolset) = args.toolchain.toolset() {
            cmd.push(format!("-T{}", toolset));
        }
        cmd.push(format!("-A{}", args.msvc_arch()));
    } else {
        cmd.push(format!(
            "-DCMAKE_C_COMPILER:FILEPATH={}",
            args.toolchain.compiler.c.display()
        ));
        cmd.push(format!(
            "-DCMAKE_CXX_COMPILER:FILEPATH={}",
            args.toolchain.compiler.cxx.display()
        ));
        if let Some(file) = args.toolchain_file() {
            cmd.push(format!("-DCMAKE_TOOLCHAIN_FILE:FILEPATH={}", file.display()));
        }
    }

    cmd.push(format!("-DCMAKE_BUILD_TYPE:STRING={}", args.build_type));

    if !args.c_flags.is_empty() {
        cmd.push(format!("-DCMAKE_C_FLAGS:STRING={}", args.c_flags.join(" ")));
    }
    if !args.cxx_flags.is_empty() {
        cmd.push(format!("-DCMAKE_CXX_FLAGS:STRING={}", args.cxx_flags.join(" ")));
    }

    if args.no_warn_unused_cli {
        cmd.push("--no-warn-unused-cli".to_string());
    }
    if args.export_compile_commands {
        cmd.push("-DCMAKE_EXPORT_COMPILE_COMMANDS:BOOL=TRUE".to_string());
    }
    if let Some(ref prefix) = args.install_prefix {
        cmd.push(format!("-DCMAKE_INSTALL_PREFIX:PATH={}", prefix.display()));
    }

    cmd.push(format!("-S{}", args.project_path.display()));
    cmd.push(format!("-B{}", args.build_path.display()));
    cmd
}

/// Arguments for `cmake` in the build phase.
pub fn build_command(args: &BuildArgs) -> Vec<String> {
    let mut cmd = vec![
        "--build".to_string(),
        args.build_path.display().to_string(),
    ];

    if args.msvc {
        cmd.push("--config".to_string());
        cmd.push(args.build_type.to_string());
    }

    match (&args.target, args.msvc) {
        (Some(t), _) => {
            cmd.push("--target".to_string());
            cmd.push(t.clone());
        }
        // Visual Studio solutions have no `all` target; ALL_BUILD is the default.
        (None, true) => {}
        (None, false) => {
            cmd.push("--target".to_string());
            cmd.push("all".to_string());
        }
    }

    cmd.push("--".to_string());
    cmd
}

/// Where the word-size toolchain file for `platform` lives in a project.
pub fn toolchain_file_path(project: &Path, platform: Platform) -> PathBuf {
    project
        .join(CGEAR_DIR)
        .join("cmake")
        .join(format!("toolchain-{}.cmake", platform.as_str()))
}

/// CMake toolchain file forcing a word size on GCC-style compilers.
pub fn word_size_toolchain_contents(platform: Platform) -> Option<String> {
    let flag = platform.word_size_flag()?;
    let mut out = format!("# Generated by cgear for platform {}\n", platform);
    for var in [
        "CMAKE_C_FLAGS_INIT",
        "CMAKE_CXX_FLAGS_INIT",
        "CMAKE_EXE_LINKER_FLAGS_INIT",
        "CMAKE_SHARED_LINKER_FLAGS_INIT",
        "CMAKE_MODULE_LINKER_FLAGS_INIT",
    ] {
        out.push_str(&format!("set({} \"{}\")\n", var, flag));
    }
    Some(out)
}
