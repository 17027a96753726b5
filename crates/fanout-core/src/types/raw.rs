//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Raw telemetry documents
//!
//! The upstream collector hands over one JSON-shaped snapshot per poll
//! cycle. A root that is not an object is the single fatal input error;
//! every other irregularity degrades to pass-through tagging downstream.

use serde_json::{Map, Value};

use crate::error::{FanoutError, FanoutResult};

/// One poll cycle's raw snapshot, keyed by category name
#[derive(Debug, Clone, PartialEq)]
pub struct RawTelemetryDocument {
    categories: Map<String, Value>,
}

impl RawTelemetryDocument {
    /// Wrap a parsed JSON value; fails if the root is not an object
    pub fn from_value(value: Value) -> FanoutResult<Self> {
        match value {
            Value::Object(categories) => Ok(Self { categories }),
            other => Err(FanoutError::document(format!(
                "snapshot root must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse a JSON string into a document
    pub fn from_str(raw: &str) -> FanoutResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| FanoutError::document_with_source("snapshot is not valid JSON", e))?;
        Self::from_value(value)
    }

    /// Iterate categories in deterministic (key-sorted) order
    pub fn categories(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.categories.iter()
    }

    /// Look up one category by name
    pub fn get(&self, category: &str) -> Option<&Value> {
        self.categories.get(category)
    }

    /// Number of top-level categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Human-readable JSON type name for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_root_accepted() {
        let doc = RawTelemetryDocument::from_value(json!({
            "system": {"cpu": 3},
            "pools": {}
        }))
        .unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc.get("system").is_some());
        assert!(doc.get("virtualServers").is_none());
    }

    #[test]
    fn test_non_object_root_is_fatal() {
        let err = RawTelemetryDocument::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_from_str_bad_json() {
        let err = RawTelemetryDocument::from_str("{not json").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_category_iteration_is_sorted() {
        let doc = RawTelemetryDocument::from_value(json!({
            "virtualServers": {},
            "pools": {},
            "system": {}
        }))
        .unwrap();
        let names: Vec<&String> = doc.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["pools", "system", "virtualServers"]);
    }
}
