//! Flag directive assembly and rendering.

use serde::{Deserialize, Serialize};

use super::symbols::SymbolTable;

/// Default directive prefix (cgo preamble syntax).
pub const DEFAULT_PREFIX: &str = "#cgo";

/// Warnings silenced for every translation unit built from the directives.
pub const WARNING_SUPPRESSION: &str =
    "-Wno-unused-parameter -Wno-unused-variable -Wno-return-type";

/// Which toolchain invocation a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlagCategory {
    #[serde(rename = "CFLAGS")]
    CFlags,
    #[serde(rename = "CXXFLAGS")]
    CxxFlags,
    #[serde(rename = "LDFLAGS")]
    LdFlags,
}

impl FlagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagCategory::CFlags => "CFLAGS",
            FlagCategory::CxxFlags => "CXXFLAGS",
            FlagCategory::LdFlags => "LDFLAGS",
        }
    }
}

impl std::fmt::Display for FlagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Makefile variable feeding each symbol-sourced directive, in output order.
const SYMBOL_LAYOUT: [(FlagCategory, &str); 5] = [
    (FlagCategory::CFlags, "CFLAGS"),
    (FlagCategory::CxxFlags, "CXXFLAGS"),
    (FlagCategory::CxxFlags, "INCPATH"),
    (FlagCategory::LdFlags, "LFLAGS"),
    (FlagCategory::LdFlags, "LIBS"),
];

/// Fixed directives appended after the symbol-sourced ones.
const FIXED_LAYOUT: [(FlagCategory, &str); 2] = [
    (FlagCategory::CFlags, WARNING_SUPPRESSION),
    (FlagCategory::CxxFlags, WARNING_SUPPRESSION),
];

/// One category-tagged flag string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagDirective {
    pub category: FlagCategory,
    pub value: String,

    /// Makefile variable the value came from (None for fixed directives)
    pub origin: Option<String>,
}

impl FlagDirective {
    /// Render as `<prefix> <CATEGORY>: <value>`.
    ///
    /// An empty value renders without the trailing space.
    pub fn render(&self, prefix: &str) -> String {
        let head = if prefix.is_empty() {
            format!("{}:", self.category)
        } else {
            format!("{} {}:", prefix, self.category)
        };

        if self.value.is_empty() {
            head
        } else {
            format!("{} {}", head, self.value)
        }
    }
}

/// The directives handed to the code generator, in their fixed order.
///
/// Categories repeat on purpose: the consumer concatenates repeated
/// categories, so include paths and libraries get their own lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedFlagSet {
    directives: Vec<FlagDirective>,
}

impl ResolvedFlagSet {
    /// Assemble the directive set from a resolved table.
    ///
    /// Always yields the same seven directives; a missing variable gives an
    /// empty value.
    pub fn from_table(table: &SymbolTable) -> Self {
        let mut directives = Vec::with_capacity(SYMBOL_LAYOUT.len() + FIXED_LAYOUT.len());

        for (category, key) in SYMBOL_LAYOUT {
            if !table.contains(key) {
                tracing::debug!("`{}` not defined; emitting empty {} directive", key, category);
            }
            directives.push(FlagDirective {
                category,
                value: table.get(key).unwrap_or("").to_string(),
                origin: Some(key.to_string()),
            });
        }

        for (category, value) in FIXED_LAYOUT {
            directives.push(FlagDirective {
                category,
                value: value.to_string(),
                origin: None,
            });
        }

        ResolvedFlagSet { directives }
    }

    pub fn directives(&self) -> &[FlagDirective] {
        &self.directives
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Rendered directive lines.
    pub fn lines(&self, prefix: &str) -> Vec<String> {
        self.directives.iter().map(|d| d.render(prefix)).collect()
    }

    /// Rendered directives joined by newlines (no trailing newline).
    pub fn render(&self, prefix: &str) -> String {
        self.lines(prefix).join("\n")
    }

    /// JSON array of `{category, value, origin}` objects.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Output encoding for a resolved flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `<prefix> CATEGORY: value` line per directive (default)
    #[default]
    Directives,
    /// Machine-readable JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "directives" | "cgo" | "text" => Ok(OutputFormat::Directives),
            "json" => Ok(OutputFormat::Json),
            _ => Err(OutputFormatParseError(s.to_string())),
        }
    }
}

/// Error parsing output format option.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl std::fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid output format '{}', valid values: directives, json",
            self.0
        )
    }
}

impl std::error::Error for OutputFormatParseError {}
