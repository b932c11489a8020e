//! `cgear clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use cgear::ops::{clean, Project};
use cgear::util::shell::Status;
use cgear::util::{GlobalContext, Shell};

pub fn execute(args: CleanArgs, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = Project::load(&ctx)?;
    let shell = Shell::from_verbose(verbose);

    for dir in clean(&project, args.all)? {
        shell.status(Status::Removed, dir.display());
    }

    Ok(())
}
