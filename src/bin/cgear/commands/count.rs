//! `cgear count` command

use anyhow::Result;

use cgear::ops::{count, Project};
use cgear::util::{GlobalContext, Shell};

pub fn execute(verbose: bool) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let project = Project::load(&ctx)?;
    let shell = Shell::from_verbose(verbose);

    let total = count(&project)?;
    if total.files == 0 {
        shell.note("no C++ sources found");
    }
    println!("lines: {}", total.lines);

    Ok(())
}
