//! Core types shared across qmakeflags.

pub mod platform;

pub use platform::TargetOs;
