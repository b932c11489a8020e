//! `cgear run` command

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::build::options;
use cgear::builder::BuildOrchestrator;
use cgear::ops::{run, Project, RunOptions};
use cgear::util::process::SystemExecutor;
use cgear::util::{GlobalContext, Shell};

pub fn execute(args: RunArgs, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = Project::load(&ctx)?;

    let shell = Shell::from_verbose(verbose);
    let executor = SystemExecutor;
    let mut orchestrator = BuildOrchestrator::new(&executor, &shell);

    let opts = RunOptions {
        build: options(args.build, verbose),
        args: args.args,
    };
    run(&project, &mut orchestrator, &opts)
}
