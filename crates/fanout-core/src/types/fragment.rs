//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Backend payload fragments
//!
//! A projector turns one normalized record into one fragment in the target
//! backend's event shape. Fragments are grouped into uuid-stamped batches
//! by the dispatch stage before hand-off to the transport collaborator.

use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Series classification, serialized as the metrics backend's integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesType {
    /// Monotonic count, wire code 1
    Count,

    /// Per-second rate, wire code 2
    Rate,

    /// Point-in-time gauge, wire code 3
    Gauge,
}

impl SeriesType {
    /// The backend's integer code for this type
    pub fn code(&self) -> u8 {
        match self {
            SeriesType::Count => 1,
            SeriesType::Rate => 2,
            SeriesType::Gauge => 3,
        }
    }
}

impl Serialize for SeriesType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for SeriesType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(SeriesType::Count),
            2 => Ok(SeriesType::Rate),
            3 => Ok(SeriesType::Gauge),
            other => Err(D::Error::custom(format!(
                "unknown series type code: {}",
                other
            ))),
        }
    }
}

/// One timestamped point of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Epoch seconds
    pub timestamp: i64,

    /// Point value
    pub value: f64,
}

/// One time-series fragment for a metrics-style backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Backend-shaped metric name
    pub metric: String,

    /// Series points; one per record in this pipeline
    pub points: Vec<SeriesPoint>,

    /// Rendered `key:value` tags
    pub tags: Vec<String>,

    /// Series classification
    #[serde(rename = "type")]
    pub series_type: SeriesType,
}

/// One structured event for a log-oriented backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEvent(pub serde_json::Value);

/// One record's slice of the aggregated per-poll document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSlice {
    /// Dotted path segments inside the assembled document
    pub path: Vec<String>,

    /// Value stored at the path
    pub value: serde_json::Value,
}

/// Fragment shapes across all supported backend families.
///
/// Serialize-only: each variant renders as its backend's natural wire
/// shape, so the serialized form carries no variant tag to decode by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadFragment {
    /// Time-series point for a metrics backend
    Series(MetricSeries),

    /// Structured event for a log backend
    Event(LogEvent),

    /// Slice of the per-poll document for a document backend
    Slice(DocumentSlice),
}

impl PayloadFragment {
    /// Series view, if this fragment is one
    pub fn as_series(&self) -> Option<&MetricSeries> {
        match self {
            PayloadFragment::Series(series) => Some(series),
            _ => None,
        }
    }

    /// Event view, if this fragment is one
    pub fn as_event(&self) -> Option<&LogEvent> {
        match self {
            PayloadFragment::Event(event) => Some(event),
            _ => None,
        }
    }

    /// Document slice view, if this fragment is one
    pub fn as_slice(&self) -> Option<&DocumentSlice> {
        match self {
            PayloadFragment::Slice(slice) => Some(slice),
            _ => None,
        }
    }
}

/// Network-sized group of fragments bound for one backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentBatch {
    /// Batch identifier
    pub id: Uuid,

    /// Batch creation time
    pub created: DateTime<Utc>,

    /// Target backend name
    pub backend: String,

    /// Fragments in this batch
    pub fragments: Vec<PayloadFragment>,
}

impl FragmentBatch {
    /// Create a new batch for a backend
    pub fn new(backend: impl Into<String>, fragments: Vec<PayloadFragment>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created: Utc::now(),
            backend: backend.into(),
            fragments,
        }
    }

    /// Number of fragments in the batch
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_series_type_codes() {
        assert_eq!(SeriesType::Count.code(), 1);
        assert_eq!(SeriesType::Rate.code(), 2);
        assert_eq!(SeriesType::Gauge.code(), 3);
    }

    #[test]
    fn test_series_wire_shape() {
        let series = MetricSeries {
            metric: "system.cpu".to_string(),
            points: vec![SeriesPoint {
                timestamp: 1_546_304_400,
                value: 0.0,
            }],
            tags: vec!["host:telemetry.bigip.com".to_string()],
            series_type: SeriesType::Gauge,
        };

        let wire = serde_json::to_value(&series).unwrap();
        assert_eq!(
            wire,
            json!({
                "metric": "system.cpu",
                "points": [{"timestamp": 1_546_304_400, "value": 0.0}],
                "tags": ["host:telemetry.bigip.com"],
                "type": 3
            })
        );

        let back: MetricSeries = serde_json::from_value(wire).unwrap();
        assert_eq!(back, series);
    }

    #[test]
    fn test_series_type_rejects_unknown_code() {
        let err = serde_json::from_value::<SeriesType>(json!(7)).unwrap_err();
        assert!(err.to_string().contains("unknown series type code"));
    }

    #[test]
    fn test_batch_stamping() {
        let batch = FragmentBatch::new(
            "metrics",
            vec![PayloadFragment::Event(LogEvent(json!({"foo": "bar"})))],
        );
        assert_eq!(batch.backend, "metrics");
        assert_eq!(batch.len(), 1);
        assert!(!batch.is_empty());
    }
}
