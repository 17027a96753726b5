//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Ordered, unique-by-key tag sets
//!
//! Tag ordering must be document-deterministic so that the same raw input
//! always yields byte-identical output. A plain map cannot promise that,
//! so tags live in an insertion-ordered vector with in-place overwrite:
//! a later composition step that sets an existing key wins, but the key
//! keeps its original position in the sequence.

use serde::{Deserialize, Serialize};

/// Ordered sequence of `key:value` tags, unique by key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    entries: Vec<(String, String)>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a tag; an existing key is overwritten in place, keeping its position
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Get a tag value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply every tag from `other`, later-wins
    pub fn apply(&mut self, other: &TagSet) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    /// Render tags as `key:value` strings in insertion order
    pub fn to_strings(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect()
    }
}

impl FromIterator<(String, String)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for (key, value) in iter {
            tags.set(key, value);
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut tags = TagSet::new();
        tags.set("name", "/Common/app_vs");
        tags.set("tenant", "Common");
        tags.set("host", "bigip.example.com");

        let rendered = tags.to_strings();
        assert_eq!(
            rendered,
            vec![
                "name:/Common/app_vs".to_string(),
                "tenant:Common".to_string(),
                "host:bigip.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut tags = TagSet::new();
        tags.set("host", "raw-field-value");
        tags.set("tenant", "Common");
        tags.set("host", "bigip.example.com");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("host"), Some("bigip.example.com"));
        assert_eq!(
            tags.to_strings(),
            vec![
                "host:bigip.example.com".to_string(),
                "tenant:Common".to_string(),
            ]
        );
    }

    #[test]
    fn test_apply_later_wins() {
        let mut base = TagSet::new();
        base.set("host", "from-entity");
        base.set("name", "vs1");

        let context: TagSet = [("host".to_string(), "from-context".to_string())]
            .into_iter()
            .collect();
        base.apply(&context);

        assert_eq!(base.get("host"), Some("from-context"));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_unique_by_key() {
        let mut tags = TagSet::new();
        tags.set("pool", "a");
        tags.set("pool", "b");
        tags.set("pool", "c");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("pool"), Some("c"));
    }
}
