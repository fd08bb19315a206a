//! `$(VAR)` reference substitution.
//!
//! The default mode substitutes each value exactly once, using the values
//! as parsed from the makefile. A reference to a variable that itself
//! holds a reference therefore leaves that inner placeholder in place.
//! [`ResolveMode::Fixpoint`] repeats the substitution until nothing changes.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::quirks::QuirkSet;
use super::symbols::SymbolTable;

/// `$(NAME)` make variable reference.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\(([^\s)]+)\)").unwrap());

/// How far references are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveMode {
    /// One substitution per value against the parsed table
    #[default]
    SinglePass,
    /// Substitute until every value is stable or the pass limit is hit
    Fixpoint,
}

impl std::fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveMode::SinglePass => write!(f, "single-pass"),
            ResolveMode::Fixpoint => write!(f, "fixpoint"),
        }
    }
}

impl std::str::FromStr for ResolveMode {
    type Err = ResolveModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single-pass" | "single" | "once" => Ok(ResolveMode::SinglePass),
            "fixpoint" | "iterative" | "strict" => Ok(ResolveMode::Fixpoint),
            _ => Err(ResolveModeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid resolve mode.
#[derive(Debug, Clone)]
pub struct ResolveModeParseError(pub String);

impl std::fmt::Display for ResolveModeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid resolve mode '{}', valid values: single-pass, fixpoint",
            self.0
        )
    }
}

impl std::error::Error for ResolveModeParseError {}

/// Resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    pub mode: ResolveMode,

    /// Pass limit for fixpoint mode (None = number of symbols + 1)
    pub max_passes: Option<usize>,
}

impl ResolveOptions {
    pub fn new(mode: ResolveMode) -> Self {
        ResolveOptions {
            mode,
            max_passes: None,
        }
    }

    fn pass_limit(&self, table: &SymbolTable) -> usize {
        match self.mode {
            ResolveMode::SinglePass => 1,
            ResolveMode::Fixpoint => self.max_passes.unwrap_or(table.len() + 1).max(1),
        }
    }
}

/// Substitute references in every value of `table`, then patch quirks and trim.
///
/// Never fails: a reference to an undefined variable becomes the empty
/// string, and a reference that is not resolved within the pass limit is
/// left as literal text. In fixpoint mode, references to variables on a
/// reference cycle (including `LIBS = -lfoo $(LIBS)`) are never expanded.
pub fn resolve_references(table: &mut SymbolTable, options: &ResolveOptions, quirks: &QuirkSet) {
    let limit = options.pass_limit(table);
    let frozen = match options.mode {
        ResolveMode::SinglePass => HashSet::new(),
        ResolveMode::Fixpoint => cyclic_keys(table),
    };

    if !frozen.is_empty() {
        tracing::debug!(
            "leaving references to cyclic variables unexpanded: {}",
            frozen.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    let mut passes = 0;
    let mut changed = true;

    while changed && passes < limit {
        changed = substitution_pass(table, &frozen);
        passes += 1;
    }

    if options.mode == ResolveMode::Fixpoint && changed {
        tracing::warn!(
            "references still unresolved after {} passes; leaving placeholders in place",
            passes
        );
    } else {
        tracing::debug!("resolved {} symbols in {} pass(es)", table.len(), passes);
    }

    for value in table.values_mut() {
        let patched = quirks.apply(value);
        *value = patched.trim().to_string();
    }
}

/// Run one substitution over every value. Returns whether any value changed.
fn substitution_pass(table: &mut SymbolTable, frozen: &HashSet<String>) -> bool {
    let snapshot = table.clone();
    let mut changed = false;

    for value in table.values_mut() {
        let next = substitute(value, &snapshot, frozen);
        if next != *value {
            *value = next;
            changed = true;
        }
    }

    changed
}

/// Keys of `value`'s references, in order, duplicates included.
fn referenced_keys(value: &str) -> impl Iterator<Item = &str> {
    REFERENCE
        .captures_iter(value)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Defined variables that can reach themselves through references.
fn cyclic_keys(table: &SymbolTable) -> HashSet<String> {
    let graph: HashMap<&str, Vec<&str>> = table
        .iter()
        .map(|(key, value)| {
            let edges = referenced_keys(value)
                .filter(|k| table.contains(k))
                .collect();
            (key, edges)
        })
        .collect();

    let mut cyclic = HashSet::new();
    for (&start, edges) in &graph {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = edges.clone();

        while let Some(key) = stack.pop() {
            if key == start {
                cyclic.insert(start.to_string());
                break;
            }
            if visited.insert(key) {
                if let Some(next) = graph.get(key) {
                    stack.extend(next.iter().copied());
                }
            }
        }
    }
    cyclic
}

/// Replace each distinct placeholder found in `value` with its definition.
///
/// Placeholders are collected from the original value first, then each is
/// replaced in turn as a literal substring. A placeholder written several
/// times is replaced once (all occurrences together), so a copy of it that
/// an earlier replacement reintroduces is not expanded a second time; this
/// keeps a self-referencing variable from doubling once per duplicate.
/// Placeholders naming a key in `frozen` stay as written.
fn substitute(value: &str, table: &SymbolTable, frozen: &HashSet<String>) -> String {
    let mut placeholders: Vec<(&str, &str)> = Vec::new();
    for caps in REFERENCE.captures_iter(value) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if frozen.contains(key.as_str()) {
            continue;
        }
        if !placeholders.iter().any(|(p, _)| *p == whole.as_str()) {
            placeholders.push((whole.as_str(), key.as_str()));
        }
    }

    let mut out = value.to_string();
    for (placeholder, key) in placeholders {
        let replacement = table.get(key).unwrap_or("");
        out = out.replace(placeholder, replacement);
    }
    out
}
