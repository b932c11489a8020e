//! The configure → build pipeline, and running what it produced.
//!
//! Both phases are `cmake` child processes run one after the other. A
//! failing configure step means the build step is never started.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::builder::cmake::{
    build_command, configure_command, word_size_toolchain_contents, BuildArgs, ConfigureArgs,
};
use crate::builder::error::{BuildError, Phase};
use crate::util::fs::{remove_dir_all_if_exists, write_string};
use crate::util::process::{find_cmake, ProcessBuilder, ProcessExecutor, StdioMode};
use crate::util::shell::{format_duration, Shell, Status};

/// Where the pipeline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Configuring,
    Building,
    Done,
    Failed,
}

/// Per-invocation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Delete the build directory before configuring.
    pub rebuild: bool,
    /// Let cmake write to the terminal instead of capturing its output.
    pub verbose: bool,
}

/// What to execute after a successful build.
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Executable name under `<project>/bin`, without suffix.
    pub executable: String,
    pub args: Vec<String>,
    /// Prepended to the child's library search variable.
    pub lib_dirs: Vec<PathBuf>,
}

/// Runs the two cmake phases and tracks their progress.
pub struct BuildOrchestrator<'a> {
    executor: &'a dyn ProcessExecutor,
    shell: &'a Shell,
    cmake: PathBuf,
    state: BuildState,
}

impl<'a> BuildOrchestrator<'a> {
    /// Create an orchestrator using `cmake` from `PATH`.
    pub fn new(executor: &'a dyn ProcessExecutor, shell: &'a Shell) -> Self {
        Self::with_cmake(executor, shell, find_cmake())
    }

    /// Create an orchestrator with an explicit `cmake` binary.
    pub fn with_cmake(
        executor: &'a dyn ProcessExecutor,
        shell: &'a Shell,
        cmake: impl Into<PathBuf>,
    ) -> Self {
        BuildOrchestrator {
            executor,
            shell,
            cmake: cmake.into(),
            state: BuildState::Idle,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn executor(&self) -> &'a dyn ProcessExecutor {
        self.executor
    }

    /// Configure and build.
    pub fn build(
        &mut self,
        config: &ConfigureArgs,
        build: &BuildArgs,
        opts: BuildOptions,
    ) -> Result<(), BuildError> {
        self.state = BuildState::Idle;
        let result = self.build_phases(config, build, opts);
        self.state = if result.is_ok() {
            BuildState::Done
        } else {
            BuildState::Failed
        };
        result
    }

    fn build_phases(
        &mut self,
        config: &ConfigureArgs,
        build: &BuildArgs,
        opts: BuildOptions,
    ) -> Result<(), BuildError> {
        config.validate()?;

        tracing::debug!("toolchain: {}", config.toolchain.name);
        tracing::debug!("build type: {}", config.build_type);

        if opts.rebuild {
            tracing::debug!("removing {}", config.build_path.display());
            remove_dir_all_if_exists(&config.build_path).map_err(|source| {
                BuildError::Filesystem {
                    path: config.build_path.clone(),
                    source,
                }
            })?;
        }

        if let Some(file) = config.toolchain_file() {
            if let Some(contents) = word_size_toolchain_contents(config.platform) {
                write_string(&file, &contents).map_err(|source| BuildError::Filesystem {
                    path: file.clone(),
                    source,
                })?;
            }
        }

        self.state = BuildState::Configuring;
        let label = format!(
            "{} ({}, {})",
            project_name(&config.project_path),
            config.toolchain.name,
            config.build_type
        );
        self.run_phase(
            Phase::Configure,
            Status::Configuring,
            &label,
            configure_command(config),
            opts,
        )?;

        self.state = BuildState::Building;
        let label = build.target.clone().unwrap_or_else(|| "all".to_string());
        self.run_phase(
            Phase::Build,
            Status::Building,
            &label,
            build_command(build),
            opts,
        )?;

        Ok(())
    }

    fn run_phase(
        &self,
        phase: Phase,
        status: Status,
        label: &str,
        args: Vec<String>,
        opts: BuildOptions,
    ) -> Result<(), BuildError> {
        let cmd = ProcessBuilder::new(&self.cmake).args(args);
        let stdio = if opts.verbose {
            StdioMode::Inherit
        } else {
            StdioMode::Capture
        };

        let spinner = self.shell.spinner(status, label);
        let output = self
            .executor
            .execute(&cmd, stdio)
            .map_err(|e| BuildError::Spawn {
                phase,
                message: format!("{:#}", e),
            })?;
        let elapsed = spinner.elapsed();
        drop(spinner);

        if !output.success() {
            return Err(BuildError::Process {
                phase,
                code: output.code,
                output: output.combined(),
            });
        }

        tracing::debug!("{} step finished in {}", phase, format_duration(elapsed));
        Ok(())
    }

    /// Build, then execute the produced program with inherited stdio.
    ///
    /// The library search variable is extended for the child only; this
    /// process's environment is never touched.
    pub fn run(
        &mut self,
        config: &ConfigureArgs,
        build: &BuildArgs,
        opts: BuildOptions,
        run: &RunArgs,
    ) -> Result<(), BuildError> {
        self.build(config, build, opts)?;

        let exe = executable_path(&config.project_path, &run.executable);
        if !exe.is_file() {
            return Err(BuildError::MissingExecutable { path: exe });
        }

        let mut cmd = ProcessBuilder::new(&exe)
            .args(&run.args)
            .cwd(&config.project_path);
        if let Some(value) = extended_lib_path(&run.lib_dirs) {
            cmd = cmd.env(LIB_PATH_VAR, value.to_string_lossy());
        }

        self.shell.status(Status::Running, cmd.display_command());
        let output = self
            .executor
            .execute(&cmd, StdioMode::Inherit)
            .map_err(|e| BuildError::Spawn {
                phase: Phase::Run,
                message: format!("{:#}", e),
            })?;

        if !output.success() {
            return Err(BuildError::Process {
                phase: Phase::Run,
                code: output.code,
                output: String::new(),
            });
        }
        Ok(())
    }
}

/// Environment variable the dynamic loader searches for shared libraries.
#[cfg(windows)]
pub const LIB_PATH_VAR: &str = "PATH";
#[cfg(target_os = "macos")]
pub const LIB_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(all(unix, not(target_os = "macos")))]
pub const LIB_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// `lib_dirs` followed by the current value of [`LIB_PATH_VAR`], or `None` if there is nothing to add.
fn extended_lib_path(lib_dirs: &[PathBuf]) -> Option<OsString> {
    if lib_dirs.is_empty() {
        return None;
    }
    let current = env::var_os(LIB_PATH_VAR).unwrap_or_default();
    let dirs = lib_dirs
        .iter()
        .cloned()
        .chain(env::split_paths(&current));
    env::join_paths(dirs).ok()
}

/// `<project>/bin/<name><exe suffix>`.
pub fn executable_path(project: &Path, name: &str) -> PathBuf {
    project
        .join("bin")
        .join(format!("{}{}", name, env::consts::EXE_SUFFIX))
}

/// The project's directory name, used as the default executable name.
pub fn project_name(project: &Path) -> String {
    project
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}
