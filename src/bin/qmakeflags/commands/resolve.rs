//! `qmakeflags resolve` command

use anyhow::{Context, Result};

use super::{emit_options, load_current_config, open_probe};
use crate::cli::ResolveArgs;
use qmakeflags::flags::OutputFormat;
use qmakeflags::ops::emit_flags;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let config = load_current_config()?;
    let mut options = emit_options(&config, &args.opts)?;

    if let Some(prefix) = args.prefix {
        options.prefix = prefix;
    }

    if let Some(ref format) = args.format {
        options.format = format
            .parse::<OutputFormat>()
            .with_context(|| format!("invalid output format: {}", format))?;
    }

    options.output = args.output;

    let probe = open_probe(args.opts.makefile.as_deref(), options.target)?;
    let rendered = emit_flags(probe.as_ref(), &options)?;

    if options.output.is_none() {
        println!("{}", rendered);
    }

    Ok(())
}
