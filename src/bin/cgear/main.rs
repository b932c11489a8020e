//! cgear CLI - A build wrapper for CMake C/C++ projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cgear=debug")
    } else {
        EnvFilter::new("cgear=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, cli.verbose),
        Commands::Run(args) => commands::run::execute(args, cli.verbose),
        Commands::Test(args) => commands::test::execute(args, cli.verbose),
        Commands::Install(args) => commands::install::execute(args, cli.verbose),
        Commands::Env(args) => commands::env::execute(args, cli.verbose),
        Commands::Clean(args) => commands::clean::execute(args, cli.verbose),
        Commands::Count => commands::count::execute(cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
