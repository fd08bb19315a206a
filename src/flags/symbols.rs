//! Makefile symbol table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `KEY = VALUE` assignment line, as written by qmake.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\S+)\s*=\s*(.+)$").unwrap());

/// Variables defined by a generated makefile.
///
/// Keys are case-sensitive. Iteration is sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: BTreeMap<String, String>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from makefile lines.
    ///
    /// Lines that are not `KEY = VALUE` assignments are skipped; a key
    /// assigned more than once keeps its last value.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = SymbolTable::new();
        let mut skipped = 0usize;

        for line in lines {
            match parse_line(line.as_ref()) {
                Some((key, value)) => table.insert(key, value),
                None => skipped += 1,
            }
        }

        tracing::debug!(
            "parsed {} symbols ({} non-assignment lines skipped)",
            table.len(),
            skipped
        );
        table
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Whether `key` is defined.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.entries.values_mut()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SymbolTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = SymbolTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// Split one assignment line into trimmed key and value.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let caps = ASSIGNMENT.captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str().trim();
    Some((key, value))
}
