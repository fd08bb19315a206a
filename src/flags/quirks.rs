//! Toolchain quirk patches.
//!
//! qmake emits flags that are valid for its own toolchain but break the
//! consumer of the generated directives. Each quirk is a literal
//! substring replacement, optionally limited to some target platforms.

use serde::{Deserialize, Serialize};

use crate::core::platform::TargetOs;

/// Name of the built-in mingw big-object rule.
pub const BIG_OBJ_RULE: &str = "mingw-big-obj";

/// A single literal replacement applied to every resolved flag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirkRule {
    /// Short identifier shown in listings and logs
    pub name: String,

    /// Literal text to look for (not a regex)
    pub pattern: String,

    /// Text substituted for every occurrence of `pattern`
    #[serde(default)]
    pub replacement: String,

    /// Platforms this rule applies to (empty = all platforms)
    #[serde(default)]
    pub platforms: Vec<TargetOs>,
}

impl QuirkRule {
    /// Create a rule that applies on every platform.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        QuirkRule {
            name: name.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
            platforms: Vec::new(),
        }
    }

    /// Restrict the rule to the given platforms.
    pub fn on(mut self, platforms: impl IntoIterator<Item = TargetOs>) -> Self {
        self.platforms.extend(platforms);
        self
    }

    /// Whether the rule is active for `os`.
    pub fn applies_to(&self, os: TargetOs) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&os)
    }

    /// Apply the rule to `value`.
    pub fn apply(&self, value: &str) -> String {
        if self.pattern.is_empty() {
            return value.to_string();
        }
        value.replace(&self.pattern, &self.replacement)
    }
}

/// Ordered collection of quirk rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuirkSet {
    rules: Vec<QuirkRule>,
}

impl QuirkSet {
    /// An empty set; values pass through untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rules every resolution applies unless disabled.
    ///
    /// mingw builds of qmake pass `-Wa,-mbig-obj` to the assembler, but cgo
    /// cannot read big-object COFF files. The surrounding spaces are part of
    /// the pattern, so the flag is only removed between two other flags.
    pub fn builtin() -> Self {
        QuirkSet {
            rules: vec![QuirkRule::new(BIG_OBJ_RULE, " -Wa,-mbig-obj ", " ")],
        }
    }

    /// Append several rules.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = QuirkRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Keep only the rules that apply to `os`.
    pub fn for_target(&self, os: TargetOs) -> QuirkSet {
        QuirkSet {
            rules: self
                .rules
                .iter()
                .filter(|rule| rule.applies_to(os))
                .cloned()
                .collect(),
        }
    }

    /// Run every rule over `value`.
    pub fn apply(&self, value: &str) -> String {
        self.rules
            .iter()
            .fold(value.to_string(), |acc, rule| rule.apply(&acc))
    }

    pub fn rules(&self) -> &[QuirkRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
