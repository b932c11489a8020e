//! Global context for cgear operations.
//!
//! Provides centralized access to paths and environment. Nothing here is
//! global state: the context is built once in `main` and passed down.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::BaseDirs;

use crate::util::config::CONFIG_FILE;

/// Environment variable overriding the cgear home directory.
pub const HOME_ENV: &str = "CGEAR_HOME";

/// Global context containing the paths every command works from.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global cgear data (~/.cgear/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext from the process environment.
    pub fn new() -> Result<Self> {
        let cwd = env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext {
            cwd,
            home: default_home(),
        })
    }

    /// Create a GlobalContext with explicit paths.
    pub fn with_paths(cwd: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        GlobalContext {
            cwd: cwd.into(),
            home: home.into(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The cgear home directory (`$CGEAR_HOME` or `~/.cgear`).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Where fetched package sources are checked out.
    pub fn pkg_dir(&self) -> PathBuf {
        self.home.join("pkg")
    }

    /// Root of the per-package install prefixes.
    pub fn install_dir(&self) -> PathBuf {
        self.home.join("install")
    }

    /// Find the project root starting from cwd.
    ///
    /// The nearest ancestor holding `cgear.toml` wins. Failing that, the cwd
    /// itself counts if it holds a `CMakeLists.txt`.
    pub fn find_project_root(&self) -> Result<PathBuf> {
        if let Some(dir) = self
            .cwd
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
        {
            return Ok(dir.to_path_buf());
        }

        if self.cwd.join("CMakeLists.txt").is_file() {
            return Ok(self.cwd.clone());
        }

        bail!(
            "not a cgear project: no {} or CMakeLists.txt found in {} or its parents",
            CONFIG_FILE,
            self.cwd.display()
        )
    }

    /// Path of the configuration file for a project root.
    pub fn config_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }
}

fn default_home() -> PathBuf {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".cgear"))
        .unwrap_or_else(|| PathBuf::from(".cgear"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_find_project_root_from_subdir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
        let sub = tmp.path().join("src").join("core");
        std::fs::create_dir_all(&sub).unwrap();

        let ctx = GlobalContext::with_paths(&sub, tmp.path().join("home"));
        assert_eq!(ctx.find_project_root().unwrap(), tmp.path());
    }

    #[test]
    fn test_find_project_root_cmakelists_fallback() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("CMakeLists.txt"), "project(demo)\n").unwrap();

        let ctx = GlobalContext::with_paths(tmp.path(), tmp.path().join("home"));
        assert_eq!(ctx.find_project_root().unwrap(), tmp.path());
    }

    #[test]
    fn test_find_project_root_fails() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_paths(tmp.path(), tmp.path().join("home"));
        let err = ctx.find_project_root().unwrap_err();
        assert!(err.to_string().contains("not a cgear project"));
    }

    #[test]
    fn test_home_layout() {
        let ctx = GlobalContext::with_paths("/work", "/home/u/.cgear");
        assert_eq!(ctx.cwd(), Path::new("/work"));
        assert_eq!(ctx.home(), Path::new("/home/u/.cgear"));
        assert_eq!(ctx.pkg_dir(), PathBuf::from("/home/u/.cgear/pkg"));
        assert_eq!(ctx.install_dir(), PathBuf::from("/home/u/.cgear/install"));
    }

    #[test]
    #[serial]
    fn test_home_from_env() {
        let ctx = temp_env::with_var(HOME_ENV, Some("/opt/cgear-home"), || {
            GlobalContext::new().unwrap()
        });
        assert_eq!(ctx.home(), Path::new("/opt/cgear-home"));
    }

    #[test]
    #[serial]
    fn test_home_default() {
        let ctx = temp_env::with_var_unset(HOME_ENV, || GlobalContext::new().unwrap());
        assert!(ctx.home().ends_with(".cgear"));
    }
}
