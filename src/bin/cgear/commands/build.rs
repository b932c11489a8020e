//! `cgear build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use cgear::builder::BuildOrchestrator;
use cgear::ops::{build, BuildOptions, Project};
use cgear::util::process::SystemExecutor;
use cgear::util::{GlobalContext, Shell};

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = Project::load(&ctx)?;

    let shell = Shell::from_verbose(verbose);
    let executor = SystemExecutor;
    let mut orchestrator = BuildOrchestrator::new(&executor, &shell);

    build(&project, &mut orchestrator, &shell, &options(args, verbose))
}

/// Shared with `cgear run`.
pub fn options(args: BuildArgs, verbose: bool) -> BuildOptions {
    BuildOptions {
        rebuild: args.rebuild,
        target: args.target,
        build_type: args.build_type,
        verbose,
    }
}
