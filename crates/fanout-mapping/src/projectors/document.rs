//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Document projector
//!
//! Renders each record into one slice of the aggregated per-poll
//! document: category path plus the full flattened record. `assemble`
//! folds one cycle's slices back into a single nested document grouped by
//! category, the shape document stores ingest per poll.

use serde_json::{json, Map, Value};

use fanout_core::config::DocumentBackendConfig;
use fanout_core::traits::{Projected, RecordProjector};
use fanout_core::types::{
    DocumentSlice, NormalizedRecord, PayloadFragment, RecordValue,
};

/// Projector for aggregated-document backends
pub struct DocumentProjector {
    config: DocumentBackendConfig,
}

impl DocumentProjector {
    /// Create a projector from a backend configuration
    pub fn new(config: DocumentBackendConfig) -> Self {
        Self { config }
    }

    /// Fold one cycle's slices into a single per-poll document
    pub fn assemble<'a>(slices: impl IntoIterator<Item = &'a DocumentSlice>) -> Value {
        let mut document = Map::new();
        for slice in slices {
            let category = slice.path.first().cloned().unwrap_or_default();
            document
                .entry(category)
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()
                .expect("category entries are arrays")
                .push(slice.value.clone());
        }
        Value::Object(document)
    }
}

impl RecordProjector for DocumentProjector {
    fn project(&self, record: &NormalizedRecord) -> Projected {
        let mut body = Map::new();
        body.insert("metric".to_string(), json!(record.metric_name));
        match &record.value {
            Some(RecordValue::Gauge(v)) | Some(RecordValue::Counter(v)) => {
                body.insert("value".to_string(), json!(v));
            }
            Some(RecordValue::Text(s)) => {
                body.insert("value".to_string(), json!(s));
            }
            None => {}
        }
        body.insert("tags".to_string(), json!(record.tags.to_strings()));
        body.insert("timestamp".to_string(), json!(record.timestamp));

        Projected::Fragment(PayloadFragment::Slice(DocumentSlice {
            path: vec![record.entity_type.clone()],
            value: Value::Object(body),
        }))
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanout_core::types::TagSet;

    fn slice_for(record: &NormalizedRecord) -> DocumentSlice {
        let projector = DocumentProjector::new(DocumentBackendConfig::new("snapshot"));
        match projector.project(record) {
            Projected::Fragment(PayloadFragment::Slice(slice)) => slice,
            other => panic!("expected slice, got {:?}", other),
        }
    }

    #[test]
    fn test_slice_shape() {
        let mut tags = TagSet::new();
        tags.set("host", "telemetry.bigip.com");
        let record = NormalizedRecord::metric(
            "system",
            "system.cpu",
            RecordValue::Gauge(2.0),
            tags,
            1_546_304_400,
        );

        let slice = slice_for(&record);
        assert_eq!(slice.path, vec!["system".to_string()]);
        assert_eq!(slice.value["metric"], "system.cpu");
        assert_eq!(slice.value["value"], 2.0);
        assert_eq!(slice.value["tags"][0], "host:telemetry.bigip.com");
    }

    #[test]
    fn test_assemble_groups_by_category() {
        let a = NormalizedRecord::metric(
            "system",
            "system.cpu",
            RecordValue::Gauge(2.0),
            TagSet::new(),
            1_546_304_400,
        );
        let b = NormalizedRecord::metric(
            "system",
            "system.memory",
            RecordValue::Gauge(41.0),
            TagSet::new(),
            1_546_304_400,
        );
        let c = NormalizedRecord::annotation("deviceGroups", TagSet::new(), 1_546_304_400);

        let slices = vec![slice_for(&a), slice_for(&b), slice_for(&c)];
        let document = DocumentProjector::assemble(&slices);

        assert_eq!(document["system"].as_array().unwrap().len(), 2);
        assert_eq!(document["deviceGroups"].as_array().unwrap().len(), 1);
        assert_eq!(document["system"][1]["metric"], "system.memory");
    }
}
