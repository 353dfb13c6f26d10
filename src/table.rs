//! String-table data structures

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// TRA format constants
pub const QUOTE: char = '~';
pub const ESCAPED_QUOTE: &str = "~~";
pub const COMMENT_PREFIX: &str = "//";

/// An ordered mapping from numeric string keys ("strrefs") to text values.
///
/// This is the in-memory form shared by both conversion directions: the
/// decoder fills it from TRA input, the encoder drains it back out, and the
/// JSON boundary (de)serializes it as a single flat object. Iteration order
/// is first-insertion order, so decode mirrors file appearance order and
/// encode mirrors the order of the loaded JSON object.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// the position of the first occurrence (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    entries: IndexMap<String, String>,
}

impl StringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry. Returns the previous value for the key,
    /// if any.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), text.into())
    }

    /// Look up the text for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parse a table from a flat JSON object
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("failed to parse JSON string table")
    }

    /// Serialize the table as a pretty-printed flat JSON object
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize string table")
    }
}

impl FromIterator<(String, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut table = StringTable::new();
        table.insert("3", "c");
        table.insert("1", "a");
        table.insert("2", "b");

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_insert_duplicate_last_wins_keeps_position() {
        let mut table = StringTable::new();
        table.insert("10", "first");
        table.insert("20", "other");
        let old = table.insert("10", "second");

        assert_eq!(old.as_deref(), Some("first"));
        assert_eq!(table.get("10"), Some("second"));
        assert_eq!(table.len(), 2);
        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["10", "20"]);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let mut table = StringTable::new();
        table.insert("200", "Two hundred");
        table.insert("100", "One\nhundred");

        let json = table.to_json_pretty().unwrap();
        let loaded = StringTable::from_json(&json).unwrap();

        assert_eq!(loaded, table);
        let keys: Vec<_> = loaded.keys().collect();
        assert_eq!(keys, vec!["200", "100"]);
    }

    #[test]
    fn test_json_output_is_flat_object() {
        let mut table = StringTable::new();
        table.insert("100", "Hello World");

        let json = table.to_json_pretty().unwrap();
        assert!(json.contains("\"100\": \"Hello World\""));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(StringTable::from_json("{ not json").is_err());
        assert!(StringTable::from_json("[1, 2]").is_err());
    }
}
