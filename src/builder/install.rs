//! Building and installing a dependency into the cgear home.

use std::path::{Path, PathBuf};

use crate::builder::cmake::{BuildArgs, ConfigureArgs};
use crate::builder::error::BuildError;
use crate::builder::orchestrator::{BuildOptions, BuildOrchestrator};
use crate::core::BuildType;

/// Installs a CMake project twice: Debug, then Release.
///
/// Both passes share `<source>/build` and do a full rebuild, so they must
/// stay sequential. Release is only attempted once Debug has installed.
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    /// `<home>/install`
    install_root: PathBuf,
    /// Template for the configure phase; paths and build type are replaced per pass.
    template: ConfigureArgs,
    verbose: bool,
}

impl DependencyInstaller {
    pub fn new(install_root: impl Into<PathBuf>, template: ConfigureArgs, verbose: bool) -> Self {
        DependencyInstaller {
            install_root: install_root.into(),
            template,
            verbose,
        }
    }

    /// Install prefix for one pass, e.g. `<home>/install/fmt/debug`.
    pub fn prefix(&self, name: &str, build_type: BuildType) -> PathBuf {
        self.install_root
            .join(name)
            .join(build_type.as_str().to_ascii_lowercase())
    }

    /// Run both passes. Returns the install prefixes that were populated.
    pub fn install(
        &self,
        orchestrator: &mut BuildOrchestrator<'_>,
        source_dir: &Path,
        name: &str,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let mut installed = Vec::new();

        for build_type in [BuildType::Debug, BuildType::Release] {
            let prefix = self.prefix(name, build_type);
            tracing::debug!("installing {} ({}) into {}", name, build_type, prefix.display());

            let mut config = self.template.clone();
            config.project_path = source_dir.to_path_buf();
            config.build_path = source_dir.join("build");
            config.build_type = build_type;
            config.install_prefix = Some(prefix.clone());

            let build = BuildArgs::for_config(&config, Some("install".to_string()));
            let opts = BuildOptions {
                rebuild: true,
                verbose: self.verbose,
            };
            orchestrator.build(&config, &build, opts)?;

            installed.push(prefix);
        }

        Ok(installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Toolchain;
    use crate::test_support::{CommandExpectation, CommandPattern, MockExecutor, MockProcessOutput};
    use crate::util::shell::Shell;
    use std::fs;
    use tempfile::TempDir;

    fn template() -> ConfigureArgs {
        ConfigureArgs::new(
            Toolchain::new("GCC 13.2.0 x86_64-linux-gnu", "/usr/bin/gcc", "/usr/bin/g++", None),
            "/unused",
        )
    }

    #[test]
    fn test_prefix_layout() {
        let installer = DependencyInstaller::new("/home/u/.cgear/install", template(), false);
        assert_eq!(
            installer.prefix("fmt", BuildType::Debug),
            PathBuf::from("/home/u/.cgear/install/fmt/debug")
        );
        assert_eq!(
            installer.prefix("fmt", BuildType::Release),
            PathBuf::from("/home/u/.cgear/install/fmt/release")
        );
    }

    #[test]
    fn test_install_runs_debug_then_release() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("fmt");
        fs::create_dir_all(&source).unwrap();
        let home = tmp.path().join("home").join("install");

        let exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::success(""));
        let shell = Shell::quiet();
        let mut orch = BuildOrchestrator::with_cmake(&exec, &shell, "cmake");

        let installer = DependencyInstaller::new(&home, template(), false);
        let prefixes = installer.install(&mut orch, &source, "fmt").unwrap();
        assert_eq!(prefixes, vec![home.join("fmt/debug"), home.join("fmt/release")]);

        let calls = exec.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[0].args.contains(&"-DCMAKE_BUILD_TYPE:STRING=Debug".to_string()));
        assert!(calls[0].args.contains(&format!(
            "-DCMAKE_INSTALL_PREFIX:PATH={}",
            home.join("fmt/debug").display()
        )));
        assert!(calls[0].args.contains(&format!("-B{}", source.join("build").display())));
        assert_eq!(calls[1].args[2..], ["--target", "install", "--"]);
        assert!(calls[2].args.contains(&"-DCMAKE_BUILD_TYPE:STRING=Release".to_string()));
        assert!(calls[2].args.contains(&format!(
            "-DCMAKE_INSTALL_PREFIX:PATH={}",
            home.join("fmt/release").display()
        )));
    }

    #[test]
    fn test_failed_debug_skips_release() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("fmt");
        fs::create_dir_all(&source).unwrap();

        let exec = MockExecutor::new();
        exec.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith("cmake --build".into()),
            MockProcessOutput::failure(1, "install failed"),
        ));
        exec.set_default(MockProcessOutput::success(""));
        let shell = Shell::quiet();
        let mut orch = BuildOrchestrator::with_cmake(&exec, &shell, "cmake");

        let installer = DependencyInstaller::new(tmp.path().join("install"), template(), false);
        assert!(installer.install(&mut orch, &source, "fmt").is_err());
        assert_eq!(exec.calls().len(), 2);
    }
}
