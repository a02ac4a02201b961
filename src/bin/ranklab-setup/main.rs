//! ranklab-setup CLI - build and installation orchestrator for the ranklab
//! scientific distribution

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging; probe diagnostics belong on the error stream
    let filter = if cli.verbose {
        EnvFilter::new("ranklab_setup=debug")
    } else {
        EnvFilter::new("ranklab_setup=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let dist_root = match cli.dist_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    // Execute command
    match cli.command {
        Some(Commands::Clean) => {
            commands::clean::execute(&dist_root)?;
            Ok(0)
        }
        Some(Commands::Completions(args)) => {
            commands::completions::execute(args)?;
            Ok(0)
        }
        Some(Commands::Forward(args)) => commands::dispatch::execute(&dist_root, args),
        None => commands::dispatch::execute(&dist_root, Vec::new()),
    }
}
