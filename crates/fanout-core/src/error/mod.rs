//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Error handling for the telemetry fan-out pipeline
//!
//! This module provides the fatal error taxonomy for the mapping core and
//! the non-fatal per-cycle warning channel surfaced alongside every output.

pub mod types;
pub mod warnings;

// Re-export commonly used types
pub use types::{FanoutError, FanoutResult};
pub use warnings::{CycleWarning, WarningSummary};
