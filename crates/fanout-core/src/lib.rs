//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Telemetry Fan-Out Core
//!
//! This crate provides the shared vocabulary for the appliance telemetry
//! fan-out pipeline: raw snapshot documents, normalized records with
//! deterministic tag sets, backend payload fragments, the error and
//! warning taxonomy, backend configuration, and the projector/transport
//! boundary traits.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{BackendConfig, FanoutConfig};
pub use error::{CycleWarning, FanoutError, FanoutResult, WarningSummary};
pub use traits::{BatchTransport, DeliveryResult, Projected, RecordProjector};
pub use types::{
    FragmentBatch, GlobalContext, MetricKind, NormalizedRecord, PayloadFragment,
    RawTelemetryDocument, RecordValue, TagSet,
};

/// Pipeline version information
pub const PIPELINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pipeline name
pub const PIPELINE_NAME: &str = "fanout";
