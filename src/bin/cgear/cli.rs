//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use cgear::core::{BuildType, Generator, Platform};

/// cgear - A build wrapper for CMake C/C++ projects
#[derive(Parser)]
#[command(name = "cgear")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure and build the current project
    Build(BuildArgs),

    /// Build, then run the project's program
    Run(RunArgs),

    /// List the GoogleTest cases, or build and run one
    Test(TestArgs),

    /// Build and install a package into the cgear home
    Install(InstallArgs),

    /// Show or change the build environment
    Env(EnvArgs),

    /// Remove build artifacts
    Clean(CleanArgs),

    /// Count lines in C++ sources (.h, .hpp, .cpp)
    Count,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Remove the build directory before configuring
    #[arg(short, long)]
    pub rebuild: bool,

    /// Build only this target
    #[arg(short, long)]
    pub target: Option<String>,

    /// Build type for this invocation (default: the configured one)
    #[arg(long, value_name = "TYPE")]
    pub build_type: Option<BuildType>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Arguments passed to the program
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct TestArgs {
    /// `Suite` or `Suite.Case` to run; lists all tests when omitted
    pub name: Option<String>,

    /// Remove the build directory before configuring
    #[arg(short, long)]
    pub rebuild: bool,
}

#[derive(Args)]
pub struct InstallArgs {
    /// Local directory, `owner:repo`, or clone URL (default: this project)
    pub package: Option<String>,

    /// Clone again even if a checkout exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct EnvArgs {
    #[command(subcommand)]
    pub command: Option<EnvCommand>,
}

#[derive(Subcommand)]
pub enum EnvCommand {
    /// Select the compiler toolchain
    Toolchain {
        /// Toolchain name, as listed by the selection
        name: Option<String>,

        /// Scan the host again instead of using the cached list
        #[arg(long)]
        rescan: bool,
    },

    /// Select the target platform (host, x86, x64)
    Platform { value: Option<Platform> },

    /// Select the CMake generator
    Generator { value: Option<Generator> },

    /// Select the build type
    BuildType { value: Option<BuildType> },
}

#[derive(Args)]
pub struct CleanArgs {
    /// Also remove generated files under .cgear
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
