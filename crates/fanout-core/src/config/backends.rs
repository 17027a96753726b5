//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Backend configuration structures
//!
//! One configuration entry per target backend, aggregated into the
//! pipeline-level `FanoutConfig`. Each backend family owns its constraint
//! knobs (name limits, batch sizes); the mapping core only reads them.

use serde::{Deserialize, Serialize};

use crate::error::{FanoutError, FanoutResult};

/// Configuration for a metrics-series backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBackendConfig {
    /// Backend name
    pub name: String,

    /// Maximum metric name length; longer names are truncated
    pub max_metric_name_len: usize,

    /// Fragments per delivered batch
    pub batch_size: usize,
}

impl MetricsBackendConfig {
    /// Create a new metrics backend configuration with default limits
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_metric_name_len: 200,
            batch_size: 1000,
        }
    }

    /// Override the maximum metric name length
    pub fn with_max_metric_name_len(mut self, len: usize) -> Self {
        self.max_metric_name_len = len;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> FanoutResult<()> {
        if self.name.is_empty() {
            return Err(FanoutError::configuration(
                "metrics backend name cannot be empty",
            ));
        }
        if self.max_metric_name_len == 0 {
            return Err(FanoutError::configuration(
                "metrics backend max metric name length cannot be 0",
            ));
        }
        if self.batch_size == 0 {
            return Err(FanoutError::configuration(
                "metrics backend batch size cannot be 0",
            ));
        }
        Ok(())
    }
}

/// Configuration for a log-event backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogBackendConfig {
    /// Backend name
    pub name: String,

    /// Source label stamped on every event
    pub source: Option<String>,

    /// Events per delivered batch
    pub batch_size: usize,
}

impl LogBackendConfig {
    /// Create a new log backend configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            batch_size: 500,
        }
    }

    /// Set the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> FanoutResult<()> {
        if self.name.is_empty() {
            return Err(FanoutError::configuration(
                "log backend name cannot be empty",
            ));
        }
        if self.batch_size == 0 {
            return Err(FanoutError::configuration(
                "log backend batch size cannot be 0",
            ));
        }
        Ok(())
    }
}

/// Configuration for an aggregated-document backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBackendConfig {
    /// Backend name
    pub name: String,

    /// Slices per delivered batch
    pub batch_size: usize,
}

impl DocumentBackendConfig {
    /// Create a new document backend configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batch_size: 2000,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> FanoutResult<()> {
        if self.name.is_empty() {
            return Err(FanoutError::configuration(
                "document backend name cannot be empty",
            ));
        }
        if self.batch_size == 0 {
            return Err(FanoutError::configuration(
                "document backend batch size cannot be 0",
            ));
        }
        Ok(())
    }
}

/// Configuration for one target backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackendConfig {
    /// Metrics-series backend
    Metrics(MetricsBackendConfig),

    /// Log-event backend
    LogEvents(LogBackendConfig),

    /// Aggregated-document backend
    Document(DocumentBackendConfig),
}

impl BackendConfig {
    /// Backend name
    pub fn name(&self) -> &str {
        match self {
            BackendConfig::Metrics(config) => &config.name,
            BackendConfig::LogEvents(config) => &config.name,
            BackendConfig::Document(config) => &config.name,
        }
    }

    /// Configured batch size
    pub fn batch_size(&self) -> usize {
        match self {
            BackendConfig::Metrics(config) => config.batch_size,
            BackendConfig::LogEvents(config) => config.batch_size,
            BackendConfig::Document(config) => config.batch_size,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> FanoutResult<()> {
        match self {
            BackendConfig::Metrics(config) => config.validate(),
            BackendConfig::LogEvents(config) => config.validate(),
            BackendConfig::Document(config) => config.validate(),
        }
    }
}

/// Pipeline-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FanoutConfig {
    /// Configured backends, fanned out per cycle
    pub backends: Vec<BackendConfig>,
}

impl FanoutConfig {
    /// Create a configuration from a backend list
    pub fn new(backends: Vec<BackendConfig>) -> Self {
        Self { backends }
    }

    /// Validate every configured backend; backend names must be unique
    pub fn validate(&self) -> FanoutResult<()> {
        let mut seen = std::collections::HashSet::new();
        for backend in &self.backends {
            backend.validate()?;
            if !seen.insert(backend.name()) {
                return Err(FanoutError::configuration(format!(
                    "duplicate backend name: {}",
                    backend.name()
                )));
            }
        }
        Ok(())
    }
}
