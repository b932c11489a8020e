//! The project a command operates on.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::cmake::ConfigureArgs;
use crate::builder::error::ConfigurationError;
use crate::builder::orchestrator::project_name;
use crate::core::BuildType;
use crate::util::{GlobalContext, ProjectConfig};

/// A located project and its loaded configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Find the project from the context's cwd and load its `cgear.toml`
    /// (defaults when the project has none yet).
    pub fn load(ctx: &GlobalContext) -> Result<Self> {
        let found = ctx.find_project_root()?;
        let config_path = ctx.config_path(&found);
        let config = ProjectConfig::load_or_default(&config_path)?;

        let root = match config.project_path {
            Some(ref p) if p.is_absolute() => p.clone(),
            Some(ref p) => found.join(p),
            None => found,
        };

        tracing::debug!("project root: {}", root.display());
        Ok(Project {
            root,
            config_path,
            config,
        })
    }

    pub fn save(&self) -> Result<()> {
        self.config.save(&self.config_path)
    }

    /// Directory name of the project, the default executable name.
    pub fn name(&self) -> String {
        project_name(&self.root)
    }

    /// Configure args from the persisted selection.
    ///
    /// Fails with [`ConfigurationError::NoToolchain`] until a toolchain is selected.
    pub fn configure_args(
        &self,
        build_type: Option<BuildType>,
    ) -> Result<ConfigureArgs, ConfigurationError> {
        let toolchain = self
            .config
            .toolchain
            .clone()
            .ok_or(ConfigurationError::NoToolchain)?;

        let build = &self.config.build;
        let mut args = ConfigureArgs::new(toolchain, &self.root);
        args.platform = self.config.platform;
        args.generator = self.config.generator;
        args.build_type = build_type.unwrap_or(self.config.build_type);
        args.build_path = self.config.build_path(&self.root);
        args.no_warn_unused_cli = build.no_warn_unused_cli;
        args.export_compile_commands = build.export_compile_commands;
        args.c_flags = build.c_flags.clone();
        args.cxx_flags = build.cxx_flags.clone();
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Generator, Toolchain};
    use crate::util::config::CONFIG_FILE;
    use tempfile::TempDir;

    #[test]
    fn test_configure_args_requires_toolchain() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("CMakeLists.txt"), "").unwrap();
        let ctx = GlobalContext::with_paths(tmp.path(), tmp.path().join("home"));

        let project = Project::load(&ctx).unwrap();
        assert!(matches!(
            project.configure_args(None),
            Err(ConfigurationError::NoToolchain)
        ));
    }

    #[test]
    fn test_configure_args_from_config() {
        let tmp = TempDir::new().unwrap();
        let mut config = ProjectConfig::default();
        config.toolchain = Some(Toolchain::new("GCC 13.2.0 x86_64-linux-gnu", "/usr/bin/gcc", "/usr/bin/g++", None));
        config.generator = Generator::UnixMakefiles;
        config.build.build_dir = "out".into();
        config.build.cxx_flags = vec!["-Wall".into()];
        config.save(&tmp.path().join(CONFIG_FILE)).unwrap();

        let ctx = GlobalContext::with_paths(tmp.path(), tmp.path().join("home"));
        let project = Project::load(&ctx).unwrap();
        let args = project.configure_args(Some(BuildType::Release)).unwrap();

        assert_eq!(args.generator, Generator::UnixMakefiles);
        assert_eq!(args.build_type, BuildType::Release);
        assert_eq!(args.build_path, tmp.path().join("out"));
        assert_eq!(args.cxx_flags, vec!["-Wall"]);
    }
}
