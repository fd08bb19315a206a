//! Sources of raw makefile text.
//!
//! A probe yields the lines of the makefile qmake generated for a target.
//! Running qmake itself is left to the caller; probes here only read what
//! it already wrote.

use std::io::{self, Read};
use std::path::PathBuf;

use thiserror::Error;

use crate::core::platform::TargetOs;

/// Error while reading makefile text.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("makefile not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read makefile: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read makefile from stdin")]
    Stdin(#[source] io::Error),
}

/// Anything that can produce raw `KEY = VALUE` makefile text.
pub trait ToolchainProbe {
    /// Human-readable description of where the lines come from.
    fn describe(&self) -> String;

    /// Produce the makefile lines.
    fn probe(&self) -> Result<Vec<String>, ProbeError>;
}

/// Reads a makefile qmake wrote to disk.
#[derive(Debug, Clone)]
pub struct MakefileProbe {
    path: PathBuf,
    target: TargetOs,
}

impl MakefileProbe {
    pub fn new(path: impl Into<PathBuf>, target: TargetOs) -> Self {
        MakefileProbe {
            path: path.into(),
            target,
        }
    }

    /// The file that will actually be read, after variant selection.
    pub fn resolved_path(&self) -> PathBuf {
        self.target.makefile_variant(&self.path)
    }
}

impl ToolchainProbe for MakefileProbe {
    fn describe(&self) -> String {
        self.resolved_path().display().to_string()
    }

    fn probe(&self) -> Result<Vec<String>, ProbeError> {
        let path = self.resolved_path();
        if !path.is_file() {
            return Err(ProbeError::NotFound { path });
        }

        tracing::debug!("reading makefile {}", path.display());

        let bytes = std::fs::read(&path).map_err(|source| ProbeError::Read {
            path: path.clone(),
            source,
        })?;

        // qmake writes makefiles in the local code page on Windows.
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }
}

/// Makefile text already held in memory.
#[derive(Debug, Clone, Default)]
pub struct TextProbe {
    label: String,
    text: String,
}

impl TextProbe {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        TextProbe {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Read all of `reader` up front, decoding it as lossy UTF-8.
    pub fn from_reader(label: impl Into<String>, mut reader: impl Read) -> Result<Self, ProbeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(ProbeError::Stdin)?;
        Ok(TextProbe::new(
            label,
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    /// Read the whole of stdin.
    pub fn stdin() -> Result<Self, ProbeError> {
        Self::from_reader("<stdin>", io::stdin().lock())
    }
}

impl ToolchainProbe for TextProbe {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn probe(&self) -> Result<Vec<String>, ProbeError> {
        Ok(self.text.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_makefile_probe_reads_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("viewer.makefile");
        std::fs::write(&path, "CC = gcc\nCFLAGS = -O2\n").unwrap();

        let lines = MakefileProbe::new(&path, TargetOs::Linux).probe().unwrap();
        assert_eq!(lines, vec!["CC = gcc", "CFLAGS = -O2"]);
    }

    #[test]
    fn test_makefile_probe_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = MakefileProbe::new(tmp.path().join("nope"), TargetOs::Linux)
            .probe()
            .unwrap_err();
        assert!(matches!(err, ProbeError::NotFound { .. }));
        assert!(err.to_string().contains("makefile not found"));
    }

    #[test]
    fn test_makefile_probe_windows_release_variant() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("viewer.makefile");
        std::fs::write(&path, "first: release\n").unwrap();
        std::fs::write(tmp.path().join("viewer.makefile.Release"), "LIBS = -lQt5Core\n").unwrap();

        let probe = MakefileProbe::new(&path, TargetOs::Windows);
        assert_eq!(probe.probe().unwrap(), vec!["LIBS = -lQt5Core"]);
        assert!(probe.describe().ends_with("viewer.makefile.Release"));
    }

    #[test]
    fn test_makefile_probe_lossy_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Makefile");
        std::fs::write(&path, b"INCPATH = -IC:/Qt/\xe9\n").unwrap();

        let lines = MakefileProbe::new(&path, TargetOs::Linux).probe().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("INCPATH = -IC:/Qt/"));
    }

    #[test]
    fn test_text_probe_from_reader() {
        let probe = TextProbe::from_reader("test", "A = 1\r\nB = 2".as_bytes()).unwrap();
        assert_eq!(probe.probe().unwrap(), vec!["A = 1", "B = 2"]);
        assert_eq!(probe.describe(), "test");
    }

    #[test]
    fn test_text_probe_from_reader_lossy_utf8() {
        let input: &[u8] = b"INCPATH = -IC:/Qt/\xe9\nLIBS = -lQt5Core\n";
        let lines = TextProbe::from_reader("test", input).unwrap().probe().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("INCPATH = -IC:/Qt/"));
        assert_eq!(lines[1], "LIBS = -lQt5Core");
    }
}
