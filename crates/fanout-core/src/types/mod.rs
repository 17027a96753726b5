//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Data structures for the telemetry fan-out pipeline
//!
//! This module provides the core data structures shared by the mapping
//! engine and the backend projectors: the raw input document, normalized
//! records with their tag sets, the per-cycle context, and the
//! backend-facing payload fragments.

pub mod context;
pub mod fragment;
pub mod raw;
pub mod record;
pub mod tags;

// Re-export commonly used types
pub use context::GlobalContext;
pub use fragment::{
    DocumentSlice, FragmentBatch, LogEvent, MetricSeries, PayloadFragment, SeriesPoint, SeriesType,
};
pub use raw::RawTelemetryDocument;
pub use record::{MetricKind, NormalizedRecord, RecordValue};
pub use tags::TagSet;
