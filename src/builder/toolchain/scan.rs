//! Search-path scanning for compiler drivers.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::{CandidateCompiler, CompilerFamily};

/// Finds compiler drivers on a search path.
///
/// Only checks that the files exist; identifying them is [`super::parse`]'s job.
#[derive(Debug, Clone)]
pub struct ToolchainScanner {
    search_path: OsString,
}

impl ToolchainScanner {
    /// Scanner over the process's `PATH`.
    pub fn from_env() -> Self {
        ToolchainScanner {
            search_path: env::var_os("PATH").unwrap_or_default(),
        }
    }

    /// Scanner over an explicit search-path value (platform separator).
    pub fn with_search_path(search_path: impl AsRef<OsStr>) -> Self {
        ToolchainScanner {
            search_path: search_path.as_ref().to_os_string(),
        }
    }

    /// Every (directory, family) pair whose C++ driver exists, in search-path order.
    ///
    /// The same compiler reachable through two directories yields two candidates.
    pub fn scan(&self) -> Vec<CandidateCompiler> {
        let mut found = Vec::new();

        for dir in env::split_paths(&self.search_path) {
            if dir.as_os_str().is_empty() || !dir.is_dir() {
                continue;
            }

            for family in CompilerFamily::ALL {
                let cxx_path = executable_in(&dir, family.cxx_binary());
                if !cxx_path.is_file() {
                    continue;
                }

                tracing::debug!("found {} at {}", family, cxx_path.display());
                found.push(CandidateCompiler {
                    family,
                    c_path: executable_in(&dir, family.c_binary()),
                    cxx_path,
                });
            }
        }

        found
    }
}

fn executable_in(dir: &Path, base: &str) -> PathBuf {
    dir.join(format!("{}{}", base, env::consts::EXE_SUFFIX))
}
