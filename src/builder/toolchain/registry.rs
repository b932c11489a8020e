//! The user-selectable toolchain set.

use super::{probe_candidate, CompilerInfoParser, MsvcDiscoverer, ToolchainScanner};
use crate::core::Toolchain;
use crate::util::process::ProcessExecutor;

/// De-duplicated toolchains, in discovery order.
///
/// Scanned compilers come first (search-path order), MSVC toolsets after.
/// When two entries share a display name the first one wins, so the
/// compiler earliest on `PATH` is the one kept.
#[derive(Debug, Clone, Default)]
pub struct ToolchainRegistry {
    toolchains: Vec<Toolchain>,
}

impl ToolchainRegistry {
    /// Build a registry from already-known toolchains (e.g. the cached list).
    pub fn from_toolchains(toolchains: impl IntoIterator<Item = Toolchain>) -> Self {
        let mut registry = ToolchainRegistry::default();
        for tc in toolchains {
            registry.add(tc);
        }
        registry
    }

    /// Run every discoverer and collect what they find.
    ///
    /// Candidates that fail to identify are logged and skipped.
    pub fn discover(
        executor: &dyn ProcessExecutor,
        scanner: &ToolchainScanner,
        parser: &dyn CompilerInfoParser,
        msvc: &MsvcDiscoverer,
    ) -> Self {
        let mut registry = ToolchainRegistry::default();

        for candidate in scanner.scan() {
            match probe_candidate(executor, parser, &candidate) {
                Ok(tc) => {
                    registry.add(tc);
                }
                Err(e) => tracing::warn!("ignoring {}: {}", candidate.cxx_path.display(), e),
            }
        }

        for tc in msvc.discover(executor) {
            registry.add(tc);
        }

        tracing::debug!("discovered {} toolchain(s)", registry.len());
        registry
    }

    /// Add a toolchain unless one with the same name is already present.
    ///
    /// Returns whether it was added.
    pub fn add(&mut self, toolchain: Toolchain) -> bool {
        if self.find(&toolchain.name).is_some() {
            tracing::debug!("duplicate toolchain {}, keeping the first", toolchain.name);
            return false;
        }
        self.toolchains.push(toolchain);
        true
    }

    pub fn find(&self, name: &str) -> Option<&Toolchain> {
        self.toolchains.iter().find(|t| t.name == name)
    }

    pub fn toolchains(&self) -> &[Toolchain] {
        &self.toolchains
    }

    pub fn names(&self) -> Vec<String> {
        self.toolchains.iter().map(|t| t.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.toolchains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolchains.is_empty()
    }

    pub fn into_vec(self) -> Vec<Toolchain> {
        self.toolchains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::toolchain::BannerParser;
    use crate::test_support::{CommandExpectation, CommandPattern, MockExecutor, MockProcessOutput};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const GCC_13: &str = "Target: x86_64-linux-gnu\ngcc version 13.2.0 (Ubuntu 13.2.0-4ubuntu3)\n";

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX)), "").unwrap();
    }

    #[test]
    fn test_discover_dedups_and_skips_failures() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        touch(&a, "g++");
        touch(&a, "clang++");
        touch(&b, "g++");

        let exec = MockExecutor::new();
        exec.expect_contains("clang++", MockProcessOutput::success("not a banner"));
        exec.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains("g++ -v".into()),
            MockProcessOutput::with_output(0, "", GCC_13),
        ));

        let scanner = ToolchainScanner::with_search_path(std::env::join_paths([&a, &b]).unwrap());
        let registry = ToolchainRegistry::discover(
            &exec,
            &scanner,
            &BannerParser,
            &MsvcDiscoverer::with_vswhere(None),
        );

        assert_eq!(registry.names(), vec!["GCC 13.2.0 x86_64-linux-gnu"]);
        let kept = registry.find("GCC 13.2.0 x86_64-linux-gnu").unwrap();
        assert!(kept.compiler.cxx.starts_with(&a));
        assert_eq!(exec.calls().len(), 3);
    }

    #[test]
    fn test_from_toolchains_keeps_first() {
        let registry = ToolchainRegistry::from_toolchains([
            Toolchain::new("GCC 13.2.0 x86_64-linux-gnu", "/usr/bin/gcc", "/usr/bin/g++", None),
            Toolchain::new("GCC 13.2.0 x86_64-linux-gnu", "/opt/bin/gcc", "/opt/bin/g++", None),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.toolchains()[0].compiler.c,
            std::path::PathBuf::from("/usr/bin/gcc")
        );
    }
}
