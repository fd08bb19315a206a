//! Test utilities and mocks for qmakeflags unit tests.
//!
//! Provides a mock [`ToolchainProbe`] and makefile fixtures so resolver
//! and operation tests never depend on a qmake installation.

pub mod fixtures;

use std::io;

use crate::probe::{ProbeError, ToolchainProbe};

/// Probe that returns canned makefile text, or fails on demand.
#[derive(Debug, Clone)]
pub struct MockProbe {
    text: Option<String>,
}

impl MockProbe {
    /// A probe yielding the lines of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        MockProbe {
            text: Some(text.into()),
        }
    }

    /// A probe whose every call fails.
    pub fn failing() -> Self {
        MockProbe { text: None }
    }
}

impl ToolchainProbe for MockProbe {
    fn describe(&self) -> String {
        "<mock>".to_string()
    }

    fn probe(&self) -> Result<Vec<String>, ProbeError> {
        match self.text {
            Some(ref text) => Ok(text.lines().map(str::to_string).collect()),
            None => Err(ProbeError::Stdin(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "mock probe failure",
            ))),
        }
    }
}
