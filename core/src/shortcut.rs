//! Text replacement shortcuts.
//!
//! A replacement table maps short triggers ("omw") to expansions ("On my
//! way!"). The table is supplied by the host, usually from the user's
//! settings, and its order matters: the matcher reports matches in table
//! order, so earlier entries win when the suggestion strip is full.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::utils::{fold, normalize};

/// Default number of suggestions shown in the suggestion strip.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// One shortcut and its expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub shortcut: String,
    pub replacement: String,
}

impl ReplacementEntry {
    pub fn new<S: Into<String>, R: Into<String>>(shortcut: S, replacement: R) -> Self {
        Self {
            shortcut: shortcut.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered collection of replacement entries.
///
/// Serialized as a JSON array of `{ "shortcut": ..., "replacement": ... }`
/// objects so that order survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementTable {
    entries: Vec<ReplacementEntry>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (shortcut, replacement) pairs, keeping their order.
    pub fn from_pairs<I, S, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, R)>,
        S: Into<String>,
        R: Into<String>,
    {
        let mut table = Self::new();
        for (shortcut, replacement) in pairs {
            table.insert(shortcut, replacement);
        }
        table
    }

    /// Add an entry at the end.
    ///
    /// Shortcuts are stored NFC-normalized and trimmed. An existing entry
    /// with the same shortcut is updated in place and keeps its position.
    pub fn insert<S: Into<String>, R: Into<String>>(&mut self, shortcut: S, replacement: R) {
        let shortcut = normalize(&shortcut.into());
        let replacement = replacement.into();
        match self.entries.iter_mut().find(|e| e.shortcut == shortcut) {
            Some(existing) => existing.replacement = replacement,
            None => self.entries.push(ReplacementEntry {
                shortcut,
                replacement,
            }),
        }
    }

    /// Remove the entry for `shortcut`.
    pub fn remove(&mut self, shortcut: &str) -> Option<ReplacementEntry> {
        let shortcut = normalize(shortcut);
        let index = self.entries.iter().position(|e| e.shortcut == shortcut)?;
        Some(self.entries.remove(index))
    }

    /// Exact lookup.
    pub fn get(&self, shortcut: &str) -> Option<&ReplacementEntry> {
        let shortcut = normalize(shortcut);
        self.entries.iter().find(|e| e.shortcut == shortcut)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ReplacementEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplacementEntry> {
        self.entries.iter()
    }

    /// Parse a table from its JSON form, normalizing shortcuts as `insert`
    /// does.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<ReplacementEntry> = serde_json::from_str(content)?;
        Ok(Self::from_pairs(
            entries.into_iter().map(|e| (e.shortcut, e.replacement)),
        ))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a table from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read replacement table {}", path.display()))?;
        let table = Self::from_json_str(&content)
            .with_context(|| format!("parse replacement table {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded replacement table");
        Ok(table)
    }

    /// Write the table to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_json_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("write replacement table {}", path.display()))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ReplacementTable {
    type Item = &'a ReplacementEntry;
    type IntoIter = std::slice::Iter<'a, ReplacementEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Case-insensitive prefix matcher over a replacement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutMatcher {
    limit: usize,
}

impl ShortcutMatcher {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_SUGGESTIONS)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entries whose shortcut starts with `query`, ignoring case.
    ///
    /// At most `limit` entries, in table order. An empty query matches
    /// nothing.
    pub fn find_matches<'a>(
        &self,
        table: &'a ReplacementTable,
        query: &str,
    ) -> Vec<&'a ReplacementEntry> {
        if query.is_empty() || table.is_empty() {
            return Vec::new();
        }

        let query = fold(query);
        table
            .iter()
            .filter(|entry| fold(&entry.shortcut).starts_with(&query))
            .take(self.limit)
            .collect()
    }
}

impl Default for ShortcutMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReplacementTable {
        ReplacementTable::from_pairs([("omw", "On my way!"), ("om", "Oh my!")])
    }

    #[test]
    fn test_prefix_matches_in_table_order() {
        let table = sample();
        let matcher = ShortcutMatcher::new();

        let found: Vec<_> = matcher
            .find_matches(&table, "om")
            .into_iter()
            .map(|e| e.shortcut.as_str())
            .collect();
        assert_eq!(found, vec!["omw", "om"]);
    }

    #[test]
    fn test_matching_ignores_case() {
        let table = sample();
        let matcher = ShortcutMatcher::new();
        assert_eq!(
            matcher.find_matches(&table, "OM"),
            matcher.find_matches(&table, "om")
        );

        let table = ReplacementTable::from_pairs([("BRB", "be right back")]);
        assert_eq!(matcher.find_matches(&table, "br").len(), 1);
    }

    #[test]
    fn test_empty_inputs_match_nothing() {
        let matcher = ShortcutMatcher::new();
        assert!(matcher.find_matches(&sample(), "").is_empty());
        assert!(matcher.find_matches(&ReplacementTable::new(), "om").is_empty());
        assert!(matcher.find_matches(&sample(), "omwx").is_empty());
    }

    #[test]
    fn test_limit_keeps_first_entries() {
        let table = ReplacementTable::from_pairs((0..8).map(|i| (format!("ab{i}"), format!("{i}"))));
        let found = ShortcutMatcher::new().find_matches(&table, "a");
        assert_eq!(found.len(), 5);
        assert_eq!(found[0].shortcut, "ab0");
        assert_eq!(found[4].shortcut, "ab4");

        let found = ShortcutMatcher::with_limit(2).find_matches(&table, "ab");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_insert_updates_in_place() {
        let mut table = sample();
        table.insert("omw", "On my way");
        table.insert("ty", "Thank you");
        assert_eq!(table.len(), 3);
        assert_eq!(table.entries()[0].replacement, "On my way");
        assert_eq!(table.entries()[2].shortcut, "ty");

        assert!(table.remove("om").is_some());
        assert!(table.remove("om").is_none());
        assert_eq!(table.get("ty").map(|e| e.replacement.as_str()), Some("Thank you"));
    }

    #[test]
    fn test_shortcuts_are_normalized() {
        let mut table = ReplacementTable::new();
        table.insert(" cafe\u{301} ", "coffee shop");
        assert_eq!(table.entries()[0].shortcut, "café");
        assert!(table.get("café").is_some());

        table.insert("café", "bistro");
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries()[0].replacement, "bistro");

        let mut table = ReplacementTable::from_json_str(
            r#"[{"shortcut": "  brb", "replacement": "be right back"}]"#,
        )
        .expect("valid table");
        assert_eq!(table.entries()[0].shortcut, "brb");
        assert!(table.remove("brb ").is_some());
        assert!(table.is_empty());
    }

    #[test]
    fn test_json_keeps_order() {
        let json = r#"[
            {"shortcut": "zz", "replacement": "last alphabetically"},
            {"shortcut": "aa", "replacement": "first alphabetically"}
        ]"#;
        let table = ReplacementTable::from_json_str(json).expect("valid table");
        assert_eq!(table.entries()[0].shortcut, "zz");

        let again = ReplacementTable::from_json_str(&table.to_json_string().expect("serialize"))
            .expect("reparse");
        assert_eq!(again, table);
    }

    #[test]
    fn test_load_json_reports_path() {
        let missing = std::env::temp_dir().join("softkey_missing_table_for_test.json");
        let err = ReplacementTable::load_json(&missing).expect_err("missing file");
        assert!(format!("{err:#}").contains("softkey_missing_table_for_test.json"));
    }
}
