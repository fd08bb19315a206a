//! High-level operations.
//!
//! This module contains the implementation of qmakeflags commands.

pub mod emit;

pub use emit::{dump_symbols, emit_flags, format_symbols, resolve_flags, EmitOptions};
