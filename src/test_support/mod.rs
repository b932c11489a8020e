//! Test utilities and mocks for cgear unit tests.
//!
//! The main piece is [`MockExecutor`], a scripted [`ProcessExecutor`] that
//! records every command it is asked to run.
//!
//! # Example
//!
//! ```rust,ignore
//! use cgear::test_support::{MockExecutor, MockProcessOutput};
//!
//! #[test]
//! fn test_example() {
//!     let exec = MockExecutor::new();
//!     exec.expect_contains("g++ -v", MockProcessOutput::success("gcc version 13.2.0"));
//!
//!     // Hand `&exec` to the code under test...
//!     assert_eq!(exec.calls().len(), 1);
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};

use crate::ui::Selector;
use crate::util::process::{ProcessBuilder, ProcessExecutor, ProcessOutput, StdioMode};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// When set, the "spawn" fails with this message instead of producing output.
    pub spawn_error: Option<String>,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            spawn_error: None,
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
            spawn_error: None,
        }
    }

    /// Create an output with both stdout and stderr.
    pub fn with_output(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
            spawn_error: None,
        }
    }

    /// A program that could not be started at all.
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        MockProcessOutput {
            spawn_error: Some(message.into()),
            ..MockProcessOutput::default()
        }
    }

    fn to_output(&self, stdio: StdioMode) -> Result<ProcessOutput> {
        if let Some(ref msg) = self.spawn_error {
            bail!("{}", msg);
        }

        // Only captured children hand their streams back.
        let captured = stdio == StdioMode::Capture;
        Ok(ProcessOutput {
            code: Some(self.status),
            stdout: if captured { self.stdout.clone() } else { String::new() },
            stderr: if captured { self.stderr.clone() } else { String::new() },
        })
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Any => true,
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    pub used: usize,
}

impl CommandExpectation {
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// A command the mock was asked to run.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Program and arguments joined by spaces.
    pub command: String,
    pub args: Vec<String>,
    pub stdio: StdioMode,
    /// Environment overrides set on the child.
    pub env: HashMap<String, String>,
    /// Whether the watched path existed at the moment of the call.
    pub watched_existed: Option<bool>,
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<RecordedCall>,
    default_output: Option<MockProcessOutput>,
    watched: Option<PathBuf>,
}

/// Mock process executor for testing command execution.
///
/// Records expected commands and their outputs, and verifies that
/// commands are called as expected. Expectations are checked in the
/// order they were added; the first available match wins.
#[derive(Debug, Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    fn push(&self, expectation: CommandExpectation) -> &Self {
        if let Ok(mut state) = self.state.lock() {
            state.expectations.push(expectation);
        }
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&self, expectation: CommandExpectation) -> &Self {
        self.push(expectation)
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        if let Ok(mut state) = self.state.lock() {
            state.default_output = Some(output);
        }
        self
    }

    /// Record whether `path` exists each time a command runs.
    pub fn watch_path(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut state) = self.state.lock() {
            state.watched = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    /// Command strings of all calls, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("mock executor lock poisoned"))?;
        for (i, exp) in state.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl ProcessExecutor for MockExecutor {
    fn execute(&self, cmd: &ProcessBuilder, stdio: StdioMode) -> Result<ProcessOutput> {
        let full_cmd = cmd.display_command();
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("mock executor lock poisoned"))?;

        let watched_existed = state.watched.as_ref().map(|p| p.exists());
        let env = ["PATH", "LD_LIBRARY_PATH", "DYLD_LIBRARY_PATH"]
            .iter()
            .filter_map(|k| cmd.get_env(k).map(|v| (k.to_string(), v.to_string())))
            .collect();
        state.calls.push(RecordedCall {
            command: full_cmd.clone(),
            args: cmd.get_args().to_vec(),
            stdio,
            env,
            watched_existed,
        });

        for exp in &mut state.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                return exp.output.to_output(stdio);
            }
        }

        if let Some(ref default) = state.default_output {
            return default.to_output(stdio);
        }

        bail!("unexpected command: {}", full_cmd)
    }
}

/// Selector that replays canned answers and records what it was shown.
#[derive(Debug, Default)]
pub struct ScriptedSelector {
    answers: Mutex<VecDeque<Option<usize>>>,
    shown: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedSelector {
    pub fn new(answers: impl IntoIterator<Item = Option<usize>>) -> Self {
        ScriptedSelector {
            answers: Mutex::new(answers.into_iter().collect()),
            shown: Mutex::new(Vec::new()),
        }
    }

    /// Titles and option lists of every prompt, in order.
    pub fn shown(&self) -> Vec<(String, Vec<String>)> {
        self.shown.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Selector for ScriptedSelector {
    fn select_one(&self, title: &str, options: &[String]) -> Result<Option<usize>> {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push((title.to_string(), options.to_vec()));
        }
        let mut answers = self
            .answers
            .lock()
            .map_err(|_| anyhow!("scripted selector lock poisoned"))?;
        match answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("unexpected prompt: {}", title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_available_expectation_wins() {
        let exec = MockExecutor::new();
        exec.expect_pattern(
            CommandExpectation::new(
                CommandPattern::StartsWith("cmake".into()),
                MockProcessOutput::failure(1, "first"),
            )
            .times(1),
        );
        exec.expect_prefix("cmake", MockProcessOutput::success("second"));

        let pb = ProcessBuilder::new("cmake").arg("--version");
        let first = exec.execute(&pb, StdioMode::Capture).unwrap();
        let second = exec.execute(&pb, StdioMode::Capture).unwrap();

        assert_eq!(first.code, Some(1));
        assert_eq!(second.stdout, "second");
        exec.verify().unwrap();
        assert_eq!(exec.calls().len(), 2);
    }

    #[test]
    fn test_unexpected_command_is_error() {
        let exec = MockExecutor::new();
        let result = exec.execute(&ProcessBuilder::new("git"), StdioMode::Null);
        assert!(result.is_err());
    }

    #[test]
    fn test_spawn_failure() {
        let exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::spawn_failure("no such file"));
        let err = exec
            .execute(&ProcessBuilder::new("cmake"), StdioMode::Inherit)
            .unwrap_err();
        assert!(err.to_string().contains("no such file"));
    }
}
