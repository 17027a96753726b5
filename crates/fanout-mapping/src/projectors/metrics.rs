//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Metrics-series projector
//!
//! Renders numeric records into one-point time series for a strictly
//! numeric metrics backend. Name shaping: path separators become dots, the
//! character set is enforced, and names are truncated to the backend's
//! limit. Text values cannot be represented and are dropped with a
//! warning; tags-only records simply do not apply.

use regex::Regex;

use fanout_core::config::MetricsBackendConfig;
use fanout_core::error::CycleWarning;
use fanout_core::traits::{Projected, RecordProjector};
use fanout_core::types::{
    MetricSeries, NormalizedRecord, PayloadFragment, RecordValue, SeriesPoint, SeriesType,
};

/// Projector for metrics-series backends
pub struct MetricsProjector {
    config: MetricsBackendConfig,
    invalid_chars: Regex,
}

impl MetricsProjector {
    /// Create a projector from a backend configuration
    pub fn new(config: MetricsBackendConfig) -> Self {
        Self {
            config,
            invalid_chars: Regex::new(r"[^a-zA-Z0-9._]+").unwrap(),
        }
    }

    /// Shape a metric name to the backend's constraints
    fn shape_name(&self, name: &str) -> String {
        let dotted = name.replace('/', ".");
        let sanitized = self.invalid_chars.replace_all(&dotted, "_");
        sanitized
            .chars()
            .take(self.config.max_metric_name_len)
            .collect()
    }
}

impl RecordProjector for MetricsProjector {
    fn project(&self, record: &NormalizedRecord) -> Projected {
        let (value, series_type) = match &record.value {
            None => return Projected::Skipped,
            Some(RecordValue::Gauge(v)) => (*v, SeriesType::Gauge),
            Some(RecordValue::Counter(v)) => (*v, SeriesType::Count),
            Some(RecordValue::Text(_)) => {
                return Projected::Dropped(CycleWarning::BackendDrop {
                    backend: self.config.name.clone(),
                    metric_name: record.metric_name.clone(),
                    reason: "text value on a numeric-only backend".to_string(),
                });
            }
        };

        Projected::Fragment(PayloadFragment::Series(MetricSeries {
            metric: self.shape_name(&record.metric_name),
            points: vec![SeriesPoint {
                timestamp: record.timestamp,
                value,
            }],
            tags: record.tags.to_strings(),
            series_type,
        }))
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}
