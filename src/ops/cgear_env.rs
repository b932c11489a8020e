//! Implementation of `cgear env`: showing and changing the persisted
//! toolchain, platform, generator and build type.
//!
//! Every setter follows the same shape: an explicit value is applied
//! directly, otherwise the user picks from a list. Cancelling the pick
//! leaves the configuration untouched. Callers save the project afterwards.

use std::fmt::{self, Display};

use anyhow::{bail, Result};

use crate::builder::toolchain::{
    BannerParser, MsvcDiscoverer, ToolchainRegistry, ToolchainScanner,
};
use crate::core::{BuildType, Generator, Platform, Toolchain};
use crate::ops::project::Project;
use crate::ui::Selector;
use crate::util::process::ProcessExecutor;
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Outcome of a setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvChange {
    /// The setting now has this value.
    Set(String),
    /// The user backed out of the selection.
    Cancelled,
}

/// Snapshot printed by `cgear env`.
#[derive(Debug, Clone)]
pub struct EnvReport {
    pub home: String,
    pub toolchain: String,
    pub platform: Platform,
    pub generator: Generator,
    pub build_type: BuildType,
    pub project_type: String,
}

impl EnvReport {
    pub fn new(ctx: &GlobalContext, project: &Project) -> Self {
        let config = &project.config;
        EnvReport {
            home: ctx.home().display().to_string(),
            toolchain: config
                .toolchain
                .as_ref()
                .map(|tc| tc.name.clone())
                .unwrap_or_else(|| "(none)".to_string()),
            platform: config.platform,
            generator: config.generator,
            build_type: config.build_type,
            project_type: config.project_type.to_string(),
        }
    }
}

impl Display for EnvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "├── Home        : {}", self.home)?;
        writeln!(f, "├── Toolchain   : {}", self.toolchain)?;
        writeln!(f, "├── Platform    : {}", self.platform)?;
        writeln!(f, "├── Generator   : {}", self.generator)?;
        writeln!(f, "├── BuildType   : {}", self.build_type)?;
        write!(f, "└── ProjectType : {}", self.project_type)
    }
}

/// Where the toolchain list comes from.
pub struct Discovery<'a> {
    pub executor: &'a dyn ProcessExecutor,
    pub scanner: ToolchainScanner,
    pub msvc: MsvcDiscoverer,
}

impl<'a> Discovery<'a> {
    /// Scan `PATH` and the Visual Studio installer on this host.
    pub fn host(executor: &'a dyn ProcessExecutor) -> Self {
        Discovery {
            executor,
            scanner: ToolchainScanner::from_env(),
            msvc: MsvcDiscoverer::locate(),
        }
    }

    fn run(&self) -> ToolchainRegistry {
        ToolchainRegistry::discover(self.executor, &self.scanner, &BannerParser, &self.msvc)
    }
}

/// Select the current toolchain by name or from a list.
///
/// The list is the cached discovery result unless it is empty or `rescan`
/// is set, in which case the host is scanned and the cache replaced.
pub fn set_toolchain(
    project: &mut Project,
    selector: &dyn Selector,
    discovery: &Discovery<'_>,
    shell: &Shell,
    name: Option<&str>,
    rescan: bool,
) -> Result<EnvChange> {
    if rescan || project.config.toolchains.is_empty() {
        shell.status(Status::Scanning, "for toolchains");
        let registry = discovery.run();
        project.config.toolchains = registry.into_vec();
    }

    let registry = ToolchainRegistry::from_toolchains(project.config.toolchains.iter().cloned());
    if registry.is_empty() {
        bail!(
            "no toolchains found\n\
             hint: make sure a C++ compiler is on PATH and run `cgear env toolchain --rescan`"
        );
    }

    let chosen: Toolchain = match name {
        Some(name) => match registry.find(name) {
            Some(tc) => tc.clone(),
            None => bail!(
                "unknown toolchain `{}`\navailable toolchains:\n  {}",
                name,
                registry.names().join("\n  ")
            ),
        },
        None => match selector.select_one("Select toolchain", &registry.names())? {
            Some(i) => match registry.toolchains().get(i) {
                Some(tc) => tc.clone(),
                None => bail!(
                    "selection {} is out of range ({} toolchains)",
                    i,
                    registry.len()
                ),
            },
            None => return Ok(EnvChange::Cancelled),
        },
    };

    if chosen.msvc != project.config.generator.is_multi_config() {
        shell.warn(format!(
            "generator `{}` does not work with `{}`, pick another with `cgear env generator`",
            project.config.generator, chosen.name
        ));
    }

    let label = chosen.name.clone();
    project.config.toolchain = Some(chosen);
    Ok(EnvChange::Set(label))
}

pub fn set_platform(
    project: &mut Project,
    selector: &dyn Selector,
    value: Option<Platform>,
) -> Result<EnvChange> {
    let Some(platform) = pick(selector, "Select platform", &Platform::ALL, value)? else {
        return Ok(EnvChange::Cancelled);
    };
    project.config.platform = platform;
    Ok(EnvChange::Set(platform.to_string()))
}

pub fn set_generator(
    project: &mut Project,
    selector: &dyn Selector,
    value: Option<Generator>,
) -> Result<EnvChange> {
    let Some(generator) = pick(selector, "Select generator", &Generator::ALL, value)? else {
        return Ok(EnvChange::Cancelled);
    };
    project.config.generator = generator;
    Ok(EnvChange::Set(generator.to_string()))
}

pub fn set_build_type(
    project: &mut Project,
    selector: &dyn Selector,
    value: Option<BuildType>,
) -> Result<EnvChange> {
    let Some(build_type) = pick(selector, "Select build type", &BuildType::ALL, value)? else {
        return Ok(EnvChange::Cancelled);
    };
    project.config.build_type = build_type;
    Ok(EnvChange::Set(build_type.to_string()))
}

fn pick<T: Copy + Display>(
    selector: &dyn Selector,
    title: &str,
    all: &[T],
    value: Option<T>,
) -> Result<Option<T>> {
    if value.is_some() {
        return Ok(value);
    }
    let options: Vec<String> = all.iter().map(|v| v.to_string()).collect();
    match selector.select_one(title, &options)? {
        Some(i) => match all.get(i) {
            Some(v) => Ok(Some(*v)),
            None => bail!("selection {} is out of range ({} options)", i, all.len()),
        },
        None => Ok(None),
    }
}
