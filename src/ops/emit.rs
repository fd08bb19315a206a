//! Makefile-to-directives operations.
//!
//! These tie a [`ToolchainProbe`] to a [`FlagResolver`] and render the
//! result in the requested format.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::platform::TargetOs;
use crate::flags::{
    FlagResolver, OutputFormat, QuirkSet, ResolveMode, ResolvedFlagSet, SymbolTable,
    DEFAULT_PREFIX,
};
use crate::probe::ToolchainProbe;
use crate::util::config::Config;
use crate::util::fs::write_string;

/// Options for producing flag directives.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Platform the makefile was generated for
    pub target: TargetOs,

    /// Reference resolution mode
    pub mode: ResolveMode,

    /// Fixpoint pass limit
    pub max_passes: Option<usize>,

    /// Directive prefix
    pub prefix: String,

    /// Output format
    pub format: OutputFormat,

    /// File to write the rendered output to
    pub output: Option<PathBuf>,

    /// Quirk rules for all platforms; filtered by `target` when resolving
    pub quirks: QuirkSet,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            target: TargetOs::host(),
            mode: ResolveMode::default(),
            max_passes: None,
            prefix: DEFAULT_PREFIX.to_string(),
            format: OutputFormat::default(),
            output: None,
            quirks: QuirkSet::builtin(),
        }
    }
}

impl EmitOptions {
    /// Options seeded from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        EmitOptions {
            target: config.target_os(),
            mode: config.resolve_mode(),
            max_passes: config.resolve.max_passes,
            prefix: config
                .output
                .prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            format: config.output.format.unwrap_or_default(),
            output: None,
            quirks: config.quirk_set(),
        }
    }

    /// The resolver these options describe.
    pub fn resolver(&self) -> FlagResolver {
        FlagResolver::with_quirks(self.quirks.for_target(self.target))
            .mode(self.mode)
            .max_passes(self.max_passes)
    }
}

/// Read the probe, resolve its flags and render them.
///
/// The rendered text is returned, and also written to `options.output`
/// when set.
pub fn emit_flags(probe: &dyn ToolchainProbe, options: &EmitOptions) -> Result<String> {
    let flags = resolve_flags(probe, options)?;

    let rendered = match options.format {
        OutputFormat::Directives => flags.render(&options.prefix),
        OutputFormat::Json => flags.to_json().context("failed to serialize flags")?,
    };

    if let Some(ref output) = options.output {
        write_string(output, &format!("{}\n", rendered))?;
        tracing::info!("Wrote {} directives to {}", flags.len(), output.display());
    }

    Ok(rendered)
}

/// Read the probe and resolve its flags.
pub fn resolve_flags(probe: &dyn ToolchainProbe, options: &EmitOptions) -> Result<ResolvedFlagSet> {
    let lines = probe
        .probe()
        .with_context(|| format!("failed to probe `{}`", probe.describe()))?;

    tracing::debug!(
        "resolving {} lines from {} for {} ({})",
        lines.len(),
        probe.describe(),
        options.target,
        options.mode
    );

    Ok(options.resolver().resolve_lines(&lines))
}

/// Read the probe into a symbol table, resolved unless `raw` is set.
pub fn dump_symbols(
    probe: &dyn ToolchainProbe,
    options: &EmitOptions,
    raw: bool,
) -> Result<SymbolTable> {
    let lines = probe
        .probe()
        .with_context(|| format!("failed to probe `{}`", probe.describe()))?;

    if raw {
        Ok(SymbolTable::parse(&lines))
    } else {
        Ok(options.resolver().resolve_symbols(&lines))
    }
}

/// Format a symbol table as sorted `KEY = VALUE` lines.
pub fn format_symbols(table: &SymbolTable) -> String {
    table
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                format!("{} =", key)
            } else {
                format!("{} = {}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
