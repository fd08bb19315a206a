//! `qmakeflags symbols` command

use anyhow::Result;

use super::{emit_options, load_current_config, open_probe};
use crate::cli::SymbolsArgs;
use qmakeflags::ops::{dump_symbols, format_symbols};

pub fn execute(args: SymbolsArgs) -> Result<()> {
    let config = load_current_config()?;
    let options = emit_options(&config, &args.opts)?;

    let probe = open_probe(args.opts.makefile.as_deref(), options.target)?;
    let table = dump_symbols(probe.as_ref(), &options, args.raw)?;

    if table.is_empty() {
        tracing::warn!("no `KEY = VALUE` lines found in {}", probe.describe());
        return Ok(());
    }

    println!("{}", format_symbols(&table));

    Ok(())
}
