//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Per-cycle warning channel
//!
//! The mapping core never aborts a poll cycle for a single bad field or
//! entity. Recoverable problems are collected as warnings and returned to
//! the caller next to the successfully-mapped output.

use serde::{Deserialize, Serialize};

/// A non-fatal problem observed while mapping one poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CycleWarning {
    /// A field's raw value violates its schema-declared kind; the record was skipped
    TypeMismatch {
        /// Category the offending entity belongs to
        entity_type: String,

        /// Dotted metric path of the offending field
        metric_name: String,

        /// Kind the schema declares for the field
        expected: String,

        /// Raw value actually found
        found: String,
    },

    /// A record could not satisfy a backend's value constraints; the fragment was dropped
    BackendDrop {
        /// Backend that rejected the record
        backend: String,

        /// Dotted metric path of the rejected record
        metric_name: String,

        /// Why the backend rejected it
        reason: String,
    },
}

impl CycleWarning {
    /// Warning kind as a short string, for logging and tallies
    pub fn kind(&self) -> &'static str {
        match self {
            CycleWarning::TypeMismatch { .. } => "type_mismatch",
            CycleWarning::BackendDrop { .. } => "backend_drop",
        }
    }
}

impl std::fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleWarning::TypeMismatch {
                entity_type,
                metric_name,
                expected,
                found,
            } => write!(
                f,
                "type mismatch in {}: {} expected {}, found {}",
                entity_type, metric_name, expected, found
            ),
            CycleWarning::BackendDrop {
                backend,
                metric_name,
                reason,
            } => write!(f, "{} dropped {}: {}", backend, metric_name, reason),
        }
    }
}

/// Tallied view over one cycle's warnings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarningSummary {
    /// Records skipped because of schema/value disagreement
    pub type_mismatches: u64,

    /// Fragments dropped by backend constraints
    pub backend_drops: u64,
}

impl WarningSummary {
    /// Tally a warning list
    pub fn from_warnings(warnings: &[CycleWarning]) -> Self {
        let mut summary = WarningSummary::default();
        for warning in warnings {
            match warning {
                CycleWarning::TypeMismatch { .. } => summary.type_mismatches += 1,
                CycleWarning::BackendDrop { .. } => summary.backend_drops += 1,
            }
        }
        summary
    }

    /// Total warning count
    pub fn total(&self) -> u64 {
        self.type_mismatches + self.backend_drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_kinds() {
        let mismatch = CycleWarning::TypeMismatch {
            entity_type: "pools".to_string(),
            metric_name: "pools.activeMemberCnt".to_string(),
            expected: "gauge".to_string(),
            found: "\"two\"".to_string(),
        };
        assert_eq!(mismatch.kind(), "type_mismatch");
        assert!(mismatch.to_string().contains("pools.activeMemberCnt"));
    }

    #[test]
    fn test_summary_tally() {
        let warnings = vec![
            CycleWarning::TypeMismatch {
                entity_type: "system".to_string(),
                metric_name: "system.cpu".to_string(),
                expected: "gauge".to_string(),
                found: "\"high\"".to_string(),
            },
            CycleWarning::BackendDrop {
                backend: "metrics".to_string(),
                metric_name: "telemetryServiceInfo.cycleStart".to_string(),
                reason: "text value on a numeric-only backend".to_string(),
            },
            CycleWarning::BackendDrop {
                backend: "metrics".to_string(),
                metric_name: "telemetryServiceInfo.cycleEnd".to_string(),
                reason: "text value on a numeric-only backend".to_string(),
            },
        ];

        let summary = WarningSummary::from_warnings(&warnings);
        assert_eq!(summary.type_mismatches, 1);
        assert_eq!(summary.backend_drops, 2);
        assert_eq!(summary.total(), 3);
    }
}
