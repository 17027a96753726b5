//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Log-event projector
//!
//! Renders every record, including text metrics and tags-only
//! annotations, into one structured JSON event with the tag set flattened
//! into the event body. Log backends accept anything; this projector
//! never drops.

use serde_json::{json, Map, Value};

use fanout_core::config::LogBackendConfig;
use fanout_core::traits::{Projected, RecordProjector};
use fanout_core::types::{LogEvent, NormalizedRecord, PayloadFragment, RecordValue};

/// Projector for log-oriented backends
pub struct LogEventProjector {
    config: LogBackendConfig,
}

impl LogEventProjector {
    /// Create a projector from a backend configuration
    pub fn new(config: LogBackendConfig) -> Self {
        Self { config }
    }
}

impl RecordProjector for LogEventProjector {
    fn project(&self, record: &NormalizedRecord) -> Projected {
        let mut event = Map::new();
        event.insert("entityType".to_string(), json!(record.entity_type));
        event.insert("timestamp".to_string(), json!(record.timestamp));
        if let Some(source) = &self.config.source {
            event.insert("source".to_string(), json!(source));
        }

        if let Some(value) = &record.value {
            event.insert("metric".to_string(), json!(record.metric_name));
            let rendered = match value {
                RecordValue::Gauge(v) | RecordValue::Counter(v) => json!(v),
                RecordValue::Text(s) => json!(s),
            };
            event.insert("value".to_string(), rendered);
        }

        for (key, value) in record.tags.iter() {
            event.insert(key.to_string(), json!(value));
        }

        Projected::Fragment(PayloadFragment::Event(LogEvent(Value::Object(event))))
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}
