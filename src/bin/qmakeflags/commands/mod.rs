//! Command implementations

pub mod completions;
pub mod quirks;
pub mod resolve;
pub mod symbols;

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ResolveOpts;
use qmakeflags::core::TargetOs;
use qmakeflags::flags::{QuirkSet, ResolveMode};
use qmakeflags::ops::EmitOptions;
use qmakeflags::util::config::{global_config_path, load_config, project_config_path};
use qmakeflags::util::Config;
use qmakeflags::{MakefileProbe, TextProbe, ToolchainProbe};

/// Load global and project configuration for the current directory.
pub fn load_current_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let global = global_config_path();
    Ok(load_config(global.as_deref(), &project_config_path(&cwd)))
}

/// Parse a `--target-os` value.
pub fn parse_target_os(value: &str) -> Result<TargetOs> {
    value
        .parse()
        .with_context(|| format!("invalid target OS: {}", value))
}

/// Build emit options from configuration overridden by command-line flags.
pub fn emit_options(config: &Config, opts: &ResolveOpts) -> Result<EmitOptions> {
    let mut options = EmitOptions::from_config(config);

    if let Some(ref os) = opts.target_os {
        options.target = parse_target_os(os)?;
    }

    if let Some(ref mode) = opts.mode {
        options.mode = mode
            .parse::<ResolveMode>()
            .with_context(|| format!("invalid resolve mode: {}", mode))?;
    }

    if opts.max_passes.is_some() {
        options.max_passes = opts.max_passes;
    }

    if opts.no_builtin_quirks {
        options.quirks = QuirkSet::empty().with_rules(config.quirks.iter().cloned());
    }

    Ok(options)
}

/// Open the makefile named on the command line, or stdin.
pub fn open_probe(makefile: Option<&Path>, target: TargetOs) -> Result<Box<dyn ToolchainProbe>> {
    match makefile {
        Some(path) if path != Path::new("-") => Ok(Box::new(MakefileProbe::new(path, target))),
        _ => Ok(Box::new(TextProbe::stdin()?)),
    }
}
