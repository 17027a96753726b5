//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Normalized intermediate records
//!
//! This module provides the flat record shape produced by the tree walker
//! and consumed by every backend projector. Value classification comes
//! from the schema catalog, never from runtime inference.

use serde::{Deserialize, Serialize};

use super::tags::TagSet;

/// Value semantics a metric field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    /// Point-in-time reading
    Gauge,

    /// Monotonically accumulating count
    Counter,

    /// Opaque string value
    Text,
}

/// A scalar value classified by the schema catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordValue {
    /// Gauge value
    Gauge(f64),

    /// Cumulative counter value
    Counter(f64),

    /// Free-text value
    Text(String),
}

impl RecordValue {
    /// The kind of this value
    pub fn kind(&self) -> MetricKind {
        match self {
            RecordValue::Gauge(_) => MetricKind::Gauge,
            RecordValue::Counter(_) => MetricKind::Counter,
            RecordValue::Text(_) => MetricKind::Text,
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RecordValue::Gauge(v) | RecordValue::Counter(v) => Some(*v),
            RecordValue::Text(_) => None,
        }
    }
}

/// One normalized measurement (or tags-only annotation) for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Top-level category the entity belongs to
    pub entity_type: String,

    /// Dotted path identifying the measurement; instance keys never appear here
    pub metric_name: String,

    /// Classified scalar value; `None` marks a tags-only record
    pub value: Option<RecordValue>,

    /// Ordered, unique-by-key tags
    pub tags: TagSet,

    /// Epoch seconds, identical for every record of one poll cycle
    pub timestamp: i64,
}

impl NormalizedRecord {
    /// Create a metric record
    pub fn metric(
        entity_type: impl Into<String>,
        metric_name: impl Into<String>,
        value: RecordValue,
        tags: TagSet,
        timestamp: i64,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            metric_name: metric_name.into(),
            value: Some(value),
            tags,
            timestamp,
        }
    }

    /// Create a tags-only record for an entity with no metric fields
    pub fn annotation(entity_type: impl Into<String>, tags: TagSet, timestamp: i64) -> Self {
        let entity_type = entity_type.into();
        Self {
            metric_name: entity_type.clone(),
            entity_type,
            value: None,
            tags,
            timestamp,
        }
    }

    /// Whether this record carries a numeric metric value
    pub fn is_numeric(&self) -> bool {
        self.value
            .as_ref()
            .map(|v| v.as_f64().is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(RecordValue::Gauge(1.5).kind(), MetricKind::Gauge);
        assert_eq!(RecordValue::Counter(9.0).kind(), MetricKind::Counter);
        assert_eq!(
            RecordValue::Text("2026-01-01T00:00:00Z".to_string()).kind(),
            MetricKind::Text
        );
        assert_eq!(RecordValue::Counter(9.0).as_f64(), Some(9.0));
        assert_eq!(RecordValue::Text("x".to_string()).as_f64(), None);
    }

    #[test]
    fn test_metric_record() {
        let mut tags = TagSet::new();
        tags.set("host", "bigip.example.com");

        let record = NormalizedRecord::metric(
            "system",
            "system.cpu",
            RecordValue::Gauge(0.0),
            tags,
            1_700_000_000,
        );
        assert!(record.is_numeric());
        assert_eq!(record.metric_name, "system.cpu");
    }

    #[test]
    fn test_annotation_record() {
        let mut tags = TagSet::new();
        tags.set("foo", "bar");

        let record = NormalizedRecord::annotation("newFeatureXYZ", tags, 1_700_000_000);
        assert!(!record.is_numeric());
        assert_eq!(record.entity_type, "newFeatureXYZ");
        assert_eq!(record.metric_name, "newFeatureXYZ");
        assert!(record.value.is_none());
    }
}
