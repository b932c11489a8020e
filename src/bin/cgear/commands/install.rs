//! `cgear install` command

use anyhow::Result;

use crate::cli::InstallArgs;
use cgear::builder::BuildOrchestrator;
use cgear::ops::{install, InstallOptions, Project};
use cgear::util::process::{find_git, SystemExecutor};
use cgear::util::{GlobalContext, Shell};

pub fn execute(args: InstallArgs, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = Project::load(&ctx)?;

    let shell = Shell::from_verbose(verbose);
    let executor = SystemExecutor;
    let mut orchestrator = BuildOrchestrator::new(&executor, &shell);

    let opts = InstallOptions {
        package: args.package,
        force: args.force,
        verbose,
    };
    install(&ctx, &project, &mut orchestrator, &shell, &find_git(), &opts)?;
    Ok(())
}
