//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Configuration for the telemetry fan-out pipeline
//!
//! This module provides type-safe configuration structures with validation.
//! Loading them from files or the environment is the surrounding process's
//! concern; everything here is plain serde-deserializable data.

pub mod backends;

// Re-export commonly used types
pub use backends::{
    BackendConfig, DocumentBackendConfig, FanoutConfig, LogBackendConfig, MetricsBackendConfig,
};
