//! Implementation of `cgear install`.
//!
//! Resolves what to install (the current project, a local directory, or a
//! git repository), fetches it if needed, and hands it to the
//! [`DependencyInstaller`].

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::install::DependencyInstaller;
use crate::builder::orchestrator::{project_name, BuildOrchestrator};
use crate::ops::project::Project;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::process::{ProcessBuilder, StdioMode};
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Where a package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A directory on disk.
    Local(PathBuf),
    /// A repository to shallow-clone into `<home>/pkg/<name>`.
    Git { url: String, name: String },
}

impl PackageSource {
    /// Interpret a `cgear install` argument.
    ///
    /// An existing directory (relative to `cwd`) wins. Otherwise the argument
    /// is `owner:repo` for GitHub, or a clone URL.
    pub fn parse(spec: &str, cwd: &Path) -> Result<Self> {
        let local = cwd.join(spec);
        if local.is_dir() {
            return Ok(PackageSource::Local(local));
        }

        if spec.contains("://") || spec.starts_with("git@") {
            let name = repo_name(spec);
            if name.is_empty() {
                bail!("cannot derive a package name from `{}`", spec);
            }
            return Ok(PackageSource::Git {
                url: spec.to_string(),
                name,
            });
        }

        match spec.split_once(':') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains(':') =>
            {
                let repo = repo.trim_end_matches(".git");
                Ok(PackageSource::Git {
                    url: format!("https://github.com/{}/{}.git", owner, repo),
                    name: repo.to_string(),
                })
            }
            _ => bail!(
                "`{}` is neither a directory nor a repository\n\
                 hint: use `owner:repo` for GitHub or a full clone URL",
                spec
            ),
        }
    }
}

/// Last path segment of a clone URL without `.git`.
fn repo_name(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git")
        .to_string()
}

/// Options for the install command.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// What to install; `None` installs the current project
    pub package: Option<String>,

    /// Clone again even if a checkout exists
    pub force: bool,

    pub verbose: bool,
}

/// Install a package into `<home>/install/<name>/{debug,release}`.
///
/// The current project's toolchain and settings are used for both passes.
/// Returns the populated install prefixes.
pub fn install(
    ctx: &GlobalContext,
    project: &Project,
    orchestrator: &mut BuildOrchestrator<'_>,
    shell: &Shell,
    git: &Path,
    opts: &InstallOptions,
) -> Result<Vec<PathBuf>> {
    let template = project.configure_args(None)?;

    let (source_dir, name) = match opts.package {
        None => (project.root.clone(), project.name()),
        Some(ref spec) => match PackageSource::parse(spec, ctx.cwd())? {
            PackageSource::Local(dir) => {
                let name = project_name(&dir);
                (dir, name)
            }
            PackageSource::Git { url, name } => {
                let dest = ctx.pkg_dir().join(&name);
                fetch(orchestrator, shell, git, &url, &dest, opts.force)?;
                (dest, name)
            }
        },
    };

    if !source_dir.join("CMakeLists.txt").is_file() {
        bail!("`{}` has no CMakeLists.txt", source_dir.display());
    }

    shell.status(Status::Installing, format!("{} ({})", name, source_dir.display()));
    let installer = DependencyInstaller::new(ctx.install_dir(), template, opts.verbose);
    let prefixes = installer.install(orchestrator, &source_dir, &name)?;

    for prefix in &prefixes {
        shell.status(Status::Installed, prefix.display());
    }
    Ok(prefixes)
}

/// Shallow-clone `url` into `dest`, reusing an existing checkout unless `force`.
fn fetch(
    orchestrator: &BuildOrchestrator<'_>,
    shell: &Shell,
    git: &Path,
    url: &str,
    dest: &Path,
    force: bool,
) -> Result<()> {
    if dest.exists() {
        if !force {
            tracing::debug!("reusing checkout at {}", dest.display());
            return Ok(());
        }
        remove_dir_all_if_exists(dest)
            .with_context(|| format!("failed to remove {}", dest.display()))?;
        shell.status(Status::Removed, dest.display());
    }

    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }

    let cmd = ProcessBuilder::new(git)
        .arg("clone")
        .arg(url)
        .arg(dest)
        .arg("--depth=1");
    let spinner = shell.spinner(Status::Fetching, url);
    let output = orchestrator
        .executor()
        .execute(&cmd, StdioMode::Capture)
        .with_context(|| format!("failed to run `{}`", cmd.display_command()))?;
    drop(spinner);

    if !output.success() {
        bail!(
            "failed to clone {} (exit code {:?}):\n{}",
            url,
            output.code,
            output.combined()
        );
    }
    Ok(())
}
