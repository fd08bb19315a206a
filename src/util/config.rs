//! Configuration file support for qmakeflags.
//!
//! Two configuration file locations are read:
//! - Global: `~/.qmakeflags/config.toml` - User-wide defaults
//! - Project: `.qmakeflags/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::platform::TargetOs;
use crate::flags::{OutputFormat, QuirkRule, QuirkSet, ResolveMode};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".qmakeflags";

/// qmakeflags configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reference resolution settings
    pub resolve: ResolveConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Target platform settings
    pub target: TargetConfig,

    /// Additional toolchain quirk rules
    pub quirks: Vec<QuirkRule>,
}

/// Reference resolution configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Resolution mode (single-pass, fixpoint)
    pub mode: Option<ResolveMode>,

    /// Pass limit for fixpoint mode
    pub max_passes: Option<usize>,

    /// Apply the built-in quirk rules (None = true)
    pub builtin_quirks: Option<bool>,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directive prefix (defaults to `#cgo`)
    pub prefix: Option<String>,

    /// Output format (directives, json)
    pub format: Option<OutputFormat>,
}

/// Target platform configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Target OS (linux, darwin, windows); defaults to the host
    pub os: Option<TargetOs>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Quirk rules accumulate: global rules first, then project rules.
    pub fn merge(&mut self, other: Config) {
        if other.resolve.mode.is_some() {
            self.resolve.mode = other.resolve.mode;
        }
        if other.resolve.max_passes.is_some() {
            self.resolve.max_passes = other.resolve.max_passes;
        }
        if other.resolve.builtin_quirks.is_some() {
            self.resolve.builtin_quirks = other.resolve.builtin_quirks;
        }

        if other.output.prefix.is_some() {
            self.output.prefix = other.output.prefix;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }

        if other.target.os.is_some() {
            self.target.os = other.target.os;
        }

        self.quirks.extend(other.quirks);
    }

    /// Effective target OS.
    pub fn target_os(&self) -> TargetOs {
        self.target.os.unwrap_or_else(TargetOs::host)
    }

    /// Effective resolution mode.
    pub fn resolve_mode(&self) -> ResolveMode {
        self.resolve.mode.unwrap_or_default()
    }

    /// Every configured quirk rule, builtins first, not yet filtered by platform.
    pub fn quirk_set(&self) -> QuirkSet {
        let base = if self.resolve.builtin_quirks.unwrap_or(true) {
            QuirkSet::builtin()
        } else {
            QuirkSet::empty()
        };
        base.with_rules(self.quirks.iter().cloned())
    }
}

/// Get the global config directory (~/.qmakeflags).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.qmakeflags/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.qmakeflags/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.qmakeflags/config.toml)
/// 2. Global config (~/.qmakeflags/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.resolve.mode.is_none());
        assert!(config.resolve.builtin_quirks.is_none());
        assert!(config.quirks.is_empty());
        assert_eq!(config.resolve_mode(), ResolveMode::SinglePass);
        assert_eq!(config.quirk_set(), QuirkSet::builtin());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[resolve]
mode = "fixpoint"
max_passes = 4

[output]
prefix = "//flags"
format = "json"

[target]
os = "windows"

[[quirks]]
name = "no-keep-dllexport"
pattern = " -fno-keep-inline-dllexport "
replacement = " "
platforms = ["windows"]
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.resolve.mode, Some(ResolveMode::Fixpoint));
        assert_eq!(config.resolve.max_passes, Some(4));
        assert_eq!(config.output.prefix.as_deref(), Some("//flags"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.target_os(), TargetOs::Windows);
        assert_eq!(config.quirks.len(), 1);
        assert_eq!(config.quirks[0].platforms, vec![TargetOs::Windows]);
    }

    #[test]
    fn test_config_rejects_bad_mode() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[resolve]\nmode = \"twice\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert!(Config::load_or_default(&config_path).resolve.mode.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.resolve.mode = Some(ResolveMode::Fixpoint);
        base.output.prefix = Some("#cgo".to_string());
        base.quirks.push(QuirkRule::new("a", "-fa", ""));

        let mut override_cfg = Config::default();
        override_cfg.output.prefix = Some("//go".to_string());
        override_cfg.resolve.builtin_quirks = Some(false);
        override_cfg.quirks.push(QuirkRule::new("b", "-fb", ""));

        base.merge(override_cfg);

        assert_eq!(base.resolve.mode, Some(ResolveMode::Fixpoint)); // Not overridden
        assert_eq!(base.output.prefix.as_deref(), Some("//go"));
        assert_eq!(base.resolve.builtin_quirks, Some(false));

        let names: Vec<_> = base.quirk_set().rules().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r##"
[target]
os = "darwin"

[output]
prefix = "#cgo"
"##,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[target]
os = "linux"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        assert_eq!(config.target_os(), TargetOs::Linux);
        assert_eq!(config.output.prefix.as_deref(), Some("#cgo"));
    }

    #[test]
    fn test_load_config_project_reenables_builtin_quirks() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(&global_path, "[resolve]\nbuiltin_quirks = false\n").unwrap();
        assert_eq!(load_config(Some(&global_path), &project_path).quirk_set(), QuirkSet::empty());

        std::fs::write(&project_path, "[resolve]\nbuiltin_quirks = true\n").unwrap();
        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.resolve.builtin_quirks, Some(true));
        assert_eq!(config.quirk_set(), QuirkSet::builtin());
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert!(config.target.os.is_none());
    }
}
