//! Flag extraction from qmake makefiles.
//!
//! A [`FlagResolver`] turns the lines of a generated makefile into the
//! fixed set of compiler and linker directives consumed by a code
//! generator:
//!
//! 1. [`SymbolTable::parse`] collects `KEY = VALUE` assignments.
//! 2. [`resolve_references`] substitutes `$(KEY)` references and patches
//!    toolchain quirks.
//! 3. [`ResolvedFlagSet::from_table`] picks the flag variables in order.
//!
//! None of these steps can fail; malformed or missing input degrades to
//! empty values.

pub mod quirks;
pub mod render;
pub mod resolve;
pub mod symbols;

pub use quirks::{QuirkRule, QuirkSet};
pub use render::{FlagCategory, FlagDirective, OutputFormat, ResolvedFlagSet, DEFAULT_PREFIX};
pub use resolve::{resolve_references, ResolveMode, ResolveOptions};
pub use symbols::SymbolTable;

use crate::core::platform::TargetOs;

/// Makefile-to-directives pipeline for one target platform.
#[derive(Debug, Clone)]
pub struct FlagResolver {
    options: ResolveOptions,
    quirks: QuirkSet,
}

impl FlagResolver {
    /// Resolver with the built-in quirks for `target` and single-pass resolution.
    pub fn new(target: TargetOs) -> Self {
        FlagResolver {
            options: ResolveOptions::default(),
            quirks: QuirkSet::builtin().for_target(target),
        }
    }

    /// Resolver with an explicit quirk set, already filtered for the target.
    pub fn with_quirks(quirks: QuirkSet) -> Self {
        FlagResolver {
            options: ResolveOptions::default(),
            quirks,
        }
    }

    /// Set the resolution mode.
    pub fn mode(mut self, mode: ResolveMode) -> Self {
        self.options.mode = mode;
        self
    }

    /// Set the fixpoint pass limit.
    pub fn max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.options.max_passes = max_passes;
        self
    }

    /// Parse and resolve makefile lines into a symbol table.
    pub fn resolve_symbols<I, S>(&self, lines: I) -> SymbolTable
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = SymbolTable::parse(lines);
        resolve_references(&mut table, &self.options, &self.quirks);
        table
    }

    /// Run the full pipeline.
    pub fn resolve_lines<I, S>(&self, lines: I) -> ResolvedFlagSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ResolvedFlagSet::from_table(&self.resolve_symbols(lines))
    }
}
