//! qmakeflags CLI - qmake flag extraction for FFI code generators

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
        EnvFilter::new("qmakeflags=debug")
    } else {
        EnvFilter::new("qmakeflags=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Symbols(args) => commands::symbols::execute(args),
        Commands::Quirks(args) => commands::quirks::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
