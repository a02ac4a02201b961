//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// ranklab-setup - build and installation orchestrator for the ranklab
/// distribution
#[derive(Parser)]
#[command(name = "ranklab-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Distribution root to operate on (defaults to the current directory)
    #[arg(long, global = true)]
    pub dist_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove generated build artifacts from the source tree
    Clean,

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Any other command is classified and forwarded to the packaging
    /// backend (e.g. egg_info, build_ext, install)
    #[command(external_subcommand)]
    Forward(Vec<String>),
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
