//! qmakeflags - qmake flag extraction for FFI code generators
//!
//! This crate reads the makefile qmake generates for a Qt project,
//! resolves the make variables inside its compiler and linker flags, and
//! renders them as the fixed set of directives a cgo-style code generator
//! embeds in its preamble.

pub mod core;
pub mod flags;
pub mod ops;
pub mod probe;
pub mod util;

/// Test utilities and mocks for qmakeflags unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::platform::TargetOs;
pub use flags::{FlagResolver, ResolveMode, ResolvedFlagSet, SymbolTable};
pub use probe::{MakefileProbe, TextProbe, ToolchainProbe};
