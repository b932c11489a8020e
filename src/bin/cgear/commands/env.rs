//! `cgear env` command

use anyhow::Result;

use crate::cli::{EnvArgs, EnvCommand};
use cgear::ops::{
    set_build_type, set_generator, set_platform, set_toolchain, Discovery, EnvChange, EnvReport,
    Project,
};
use cgear::ui::TerminalSelector;
use cgear::util::process::SystemExecutor;
use cgear::util::shell::Status;
use cgear::util::{GlobalContext, Shell};

pub fn execute(args: EnvArgs, verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let mut project = Project::load(&ctx)?;

    let shell = Shell::from_verbose(verbose);
    let selector = TerminalSelector::stdio();
    let executor = SystemExecutor;

    let (what, change) = match args.command {
        None => {
            println!("{}", EnvReport::new(&ctx, &project));
            project.save()?;
            return Ok(());
        }
        Some(EnvCommand::Toolchain { name, rescan }) => {
            let discovery = Discovery::host(&executor);
            let change = set_toolchain(
                &mut project,
                &selector,
                &discovery,
                &shell,
                name.as_deref(),
                rescan,
            )?;
            ("toolchain", change)
        }
        Some(EnvCommand::Platform { value }) => {
            ("platform", set_platform(&mut project, &selector, value)?)
        }
        Some(EnvCommand::Generator { value }) => {
            ("generator", set_generator(&mut project, &selector, value)?)
        }
        Some(EnvCommand::BuildType { value }) => {
            ("build type", set_build_type(&mut project, &selector, value)?)
        }
    };

    project.save()?;

    match change {
        EnvChange::Set(value) => shell.status(Status::Updated, format!("{} to {}", what, value)),
        EnvChange::Cancelled => shell.note(format!("{} unchanged", what)),
    }
    Ok(())
}
