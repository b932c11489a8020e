//! Implementation of `cgear build` and `cgear run`.

use std::path::PathBuf;

use anyhow::Result;

use crate::builder::cmake::BuildArgs;
use crate::builder::orchestrator::{BuildOptions as PipelineOptions, BuildOrchestrator, RunArgs};
use crate::core::BuildType;
use crate::ops::project::Project;
use crate::util::shell::{format_duration, Shell, Status};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Remove the build directory first
    pub rebuild: bool,

    /// Build only this target (default: all)
    pub target: Option<String>,

    /// Override the configured build type for this invocation
    pub build_type: Option<BuildType>,

    /// Let cmake write straight to the terminal
    pub verbose: bool,
}

impl BuildOptions {
    fn pipeline(&self) -> PipelineOptions {
        PipelineOptions {
            rebuild: self.rebuild,
            verbose: self.verbose,
        }
    }
}

/// Options for the run command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub build: BuildOptions,

    /// Arguments passed through to the program
    pub args: Vec<String>,
}

/// Configure and build the project.
pub fn build(
    project: &Project,
    orchestrator: &mut BuildOrchestrator<'_>,
    shell: &Shell,
    opts: &BuildOptions,
) -> Result<()> {
    let config = project.configure_args(opts.build_type)?;
    let build = BuildArgs::for_config(&config, opts.target.clone());

    let start = std::time::Instant::now();
    orchestrator.build(&config, &build, opts.pipeline())?;

    shell.status(
        Status::Finished,
        format!(
            "`{}` target(s) in {}",
            config.build_type,
            format_duration(start.elapsed())
        ),
    );
    Ok(())
}

/// Build, then run `bin/<target or project name>` from the project root.
///
/// `<root>/lib` and `<root>/bin` are put on the child's library search path
/// so shared libraries built alongside the program are found.
pub fn run(
    project: &Project,
    orchestrator: &mut BuildOrchestrator<'_>,
    opts: &RunOptions,
) -> Result<()> {
    let config = project.configure_args(opts.build.build_type)?;
    let build = BuildArgs::for_config(&config, opts.build.target.clone());

    let run = RunArgs {
        executable: opts
            .build
            .target
            .clone()
            .unwrap_or_else(|| project.name()),
        args: opts.args.clone(),
        lib_dirs: lib_dirs(project),
    };

    orchestrator.run(&config, &build, opts.build.pipeline(), &run)?;
    Ok(())
}

fn lib_dirs(project: &Project) -> Vec<PathBuf> {
    vec![project.root.join("lib"), project.root.join("bin")]
}
