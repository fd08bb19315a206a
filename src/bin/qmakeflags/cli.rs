//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// qmakeflags - Turn qmake makefiles into cgo-style flag directives
#[derive(Parser)]
#[command(name = "qmakeflags")]
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
    /// Resolve a makefile into flag directives
    Resolve(ResolveArgs),

    /// Show the variables defined by a makefile
    Symbols(SymbolsArgs),

    /// List the toolchain quirk rules applied for a platform
    Quirks(QuirksArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by commands that resolve a makefile.
#[derive(Args)]
pub struct ResolveOpts {
    /// Makefile generated by qmake (reads stdin when omitted or `-`)
    pub makefile: Option<PathBuf>,

    /// Platform the makefile was generated for (linux, darwin, windows)
    #[arg(long, env = "QMAKEFLAGS_TARGET_OS")]
    pub target_os: Option<String>,

    /// Reference resolution mode (single-pass, fixpoint)
    #[arg(long)]
    pub mode: Option<String>,

    /// Pass limit for fixpoint resolution
    #[arg(long)]
    pub max_passes: Option<usize>,

    /// Do not apply the built-in quirk rules
    #[arg(long)]
    pub no_builtin_quirks: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub opts: ResolveOpts,

    /// Directive prefix (defaults to `#cgo`)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output format (directives, json)
    #[arg(long)]
    pub format: Option<String>,

    /// Write the directives to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SymbolsArgs {
    #[command(flatten)]
    pub opts: ResolveOpts,

    /// Show values as written, without resolving references
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct QuirksArgs {
    /// Platform to list rules for (defaults to the configured target)
    #[arg(long, env = "QMAKEFLAGS_TARGET_OS")]
    pub target_os: Option<String>,

    /// List the rules of every platform
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
