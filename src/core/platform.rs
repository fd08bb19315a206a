//! Target platform identity.
//!
//! qmake output differs per platform: the mkspec used to generate the
//! makefile, the makefile variants it writes, and the toolchain quirks
//! that have to be patched out of the resulting flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Operating system a flag set is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    #[serde(alias = "macos")]
    Darwin,
    #[serde(alias = "win32")]
    Windows,
}

impl TargetOs {
    /// Detect the host operating system.
    ///
    /// Unknown hosts are treated as Linux, which has the most generic mkspec.
    pub fn host() -> Self {
        match std::env::consts::OS {
            "macos" => TargetOs::Darwin,
            "windows" => TargetOs::Windows,
            _ => TargetOs::Linux,
        }
    }

    /// The qmake mkspec that produces makefiles for this platform.
    pub fn qmake_spec(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux-g++",
            TargetOs::Darwin => "macx-clang",
            TargetOs::Windows => "win32-g++",
        }
    }

    /// Pick the makefile qmake actually filled with flags.
    ///
    /// On Windows qmake writes a thin top-level makefile plus
    /// `<makefile>.Debug` and `<makefile>.Release`; the flags live in the
    /// release variant. Falls back to `path` when no variant exists.
    pub fn makefile_variant(&self, path: &Path) -> PathBuf {
        if *self == TargetOs::Windows {
            let mut release = path.as_os_str().to_owned();
            release.push(".Release");
            let release = PathBuf::from(release);
            if release.is_file() {
                return release;
            }
        }
        path.to_path_buf()
    }

    /// All known platforms.
    pub fn all() -> &'static [TargetOs] {
        &[TargetOs::Linux, TargetOs::Darwin, TargetOs::Windows]
    }
}

impl std::fmt::Display for TargetOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetOs::Linux => write!(f, "linux"),
            TargetOs::Darwin => write!(f, "darwin"),
            TargetOs::Windows => write!(f, "windows"),
        }
    }
}

impl std::str::FromStr for TargetOs {
    type Err = TargetOsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "darwin" | "macos" | "macx" => Ok(TargetOs::Darwin),
            "windows" | "win32" => Ok(TargetOs::Windows),
            _ => Err(TargetOsParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid target OS.
#[derive(Debug, Clone)]
pub struct TargetOsParseError(pub String);

impl std::fmt::Display for TargetOsParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid target OS '{}', valid values: linux, darwin, windows",
            self.0
        )
    }
}

impl std::error::Error for TargetOsParseError {}
