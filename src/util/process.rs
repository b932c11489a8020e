//! Subprocess execution utilities.
//!
//! Every external program cgear runs (cmake, compiler drivers, git, vswhere)
//! goes through a [`ProcessExecutor`], so callers can be tested against a
//! scripted executor instead of real processes.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// How a child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Capture stdout and stderr into the returned [`ProcessOutput`].
    Capture,
    /// Attach the child to the parent's terminal.
    Inherit,
    /// Discard everything the child writes.
    Null,
}

/// Result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the child was killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout (empty unless [`StdioMode::Capture`]).
    pub stdout: String,
    /// Captured stderr (empty unless [`StdioMode::Capture`]).
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the child exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout and stderr joined, in that order, skipping empty streams.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }
}

/// Something that can run a [`ProcessBuilder`] to completion.
pub trait ProcessExecutor {
    /// Run the command, blocking until it exits.
    ///
    /// An `Err` means the program could not be started at all; a non-zero
    /// exit is reported through [`ProcessOutput::code`].
    fn execute(&self, cmd: &ProcessBuilder, stdio: StdioMode) -> Result<ProcessOutput>;
}

/// Executor that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl ProcessExecutor for SystemExecutor {
    fn execute(&self, cmd: &ProcessBuilder, stdio: StdioMode) -> Result<ProcessOutput> {
        tracing::debug!("running `{}`", cmd.display_command());
        cmd.exec_with(stdio)
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set an environment variable for the child only.
    pub fn env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.env
            .insert(key.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get an environment override, if one was set.
    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute the command with the given stdio wiring and wait for it.
    pub fn exec_with(&self, stdio: StdioMode) -> Result<ProcessOutput> {
        let mut cmd = self.build_command();

        match stdio {
            StdioMode::Capture => {
                let output = cmd
                    .stdin(Stdio::null())
                    .output()
                    .with_context(|| format!("failed to spawn `{}`", self.program.display()))?;
                Ok(ProcessOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            StdioMode::Inherit | StdioMode::Null => {
                if stdio == StdioMode::Null {
                    cmd.stdin(Stdio::null())
                        .stdout(Stdio::null())
                        .stderr(Stdio::null());
                }
                let status = cmd
                    .status()
                    .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
                Ok(ProcessOutput {
                    code: status.code(),
                    ..ProcessOutput::default()
                })
            }
        }
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake, falling back to the bare name so spawn errors stay readable.
pub fn find_cmake() -> PathBuf {
    find_executable("cmake").unwrap_or_else(|| PathBuf::from("cmake"))
}

/// Find git.
pub fn find_git() -> PathBuf {
    find_executable("git").unwrap_or_else(|| PathBuf::from("git"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_process_builder_capture() {
        let output = ProcessBuilder::new("echo")
            .arg("hello")
            .exec_with(StdioMode::Capture)
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_builder_reports_exit_code() {
        let output = ProcessBuilder::new("sh")
            .args(["-c", "echo oops >&2; exit 3"])
            .exec_with(StdioMode::Capture)
            .unwrap();

        assert_eq!(output.code, Some(3));
        assert!(output.stderr.contains("oops"));
    }

    #[test]
    fn test_spawn_failure_is_err() {
        let result = ProcessBuilder::new("cgear-definitely-not-a-program")
            .exec_with(StdioMode::Null);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["--build", "build", "--"]);

        assert_eq!(pb.display_command(), "cmake --build build --");
    }

    #[test]
    fn test_combined_output() {
        let out = ProcessOutput {
            code: Some(1),
            stdout: "configuring\n".to_string(),
            stderr: "CMake Error: boom\n".to_string(),
        };
        assert_eq!(out.combined(), "configuring\nCMake Error: boom\n");

        let only_err = ProcessOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "boom".to_string(),
        };
        assert_eq!(only_err.combined(), "boom");
    }
}
