//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Backend projectors
//!
//! One projector per backend family, selected from the backend
//! configuration variant. Projectors are stateless record-to-fragment
//! mappings; anything a backend cannot represent is dropped with a warning
//! or skipped, never fatal.

pub mod document;
pub mod events;
pub mod metrics;

// Re-export commonly used types
pub use document::DocumentProjector;
pub use events::LogEventProjector;
pub use metrics::MetricsProjector;

use fanout_core::config::BackendConfig;
use fanout_core::traits::RecordProjector;

/// Build the projector for one configured backend
pub fn for_backend(config: &BackendConfig) -> Box<dyn RecordProjector> {
    match config {
        BackendConfig::Metrics(config) => Box::new(MetricsProjector::new(config.clone())),
        BackendConfig::LogEvents(config) => Box::new(LogEventProjector::new(config.clone())),
        BackendConfig::Document(config) => Box::new(DocumentProjector::new(config.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanout_core::config::{
        DocumentBackendConfig, LogBackendConfig, MetricsBackendConfig,
    };

    #[test]
    fn test_projector_selection() {
        let metrics = for_backend(&BackendConfig::Metrics(MetricsBackendConfig::new("m")));
        assert_eq!(metrics.name(), "m");

        let events = for_backend(&BackendConfig::LogEvents(LogBackendConfig::new("e")));
        assert_eq!(events.name(), "e");

        let document = for_backend(&BackendConfig::Document(DocumentBackendConfig::new("d")));
        assert_eq!(document.name(), "d");
    }
}
