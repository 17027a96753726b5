//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Poll-cycle pipeline
//!
//! Ties the walker, tag composer, and projectors together: one raw
//! snapshot in, one fragment set per configured backend out, plus the
//! cycle's warning list and stats. The pipeline holds no per-cycle state;
//! concurrent cycles share only the immutable catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fanout_core::config::FanoutConfig;
use fanout_core::error::{CycleWarning, FanoutResult, WarningSummary};
use fanout_core::traits::{Projected, RecordProjector};
use fanout_core::types::{GlobalContext, PayloadFragment, RawTelemetryDocument};

use crate::catalog::SchemaCatalog;
use crate::projectors;
use crate::walker;

/// One backend's share of a cycle's output
pub struct BackendOutput {
    /// Backend name
    pub backend: String,

    /// Projected fragments, in record order
    pub fragments: Vec<PayloadFragment>,

    /// Batch size configured for this backend
    pub batch_size: usize,
}

/// Counters for one mapped cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    /// Normalized records produced by the walk
    pub records: u64,

    /// Fragments produced across all backends
    pub fragments: u64,

    /// Records skipped by the walker (type mismatches)
    pub records_skipped: u64,

    /// Fragments dropped by backend constraints
    pub fragments_dropped: u64,

    /// Wall-clock duration of the mapping pass in milliseconds
    pub duration_ms: u64,
}

/// Everything one cycle produces
pub struct CycleOutput {
    /// Per-backend fragment sets
    pub outputs: Vec<BackendOutput>,

    /// Accumulated warnings; never blocks the mapped subset
    pub warnings: Vec<CycleWarning>,

    /// Cycle counters
    pub stats: CycleStats,
}

impl CycleOutput {
    /// Tallied warning view
    pub fn warning_summary(&self) -> WarningSummary {
        WarningSummary::from_warnings(&self.warnings)
    }
}

/// The mapping engine for one configured fan-out
pub struct PollPipeline {
    catalog: Arc<SchemaCatalog>,
    backends: Vec<(Box<dyn RecordProjector>, usize)>,
}

impl std::fmt::Debug for PollPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollPipeline")
            .field("backends", &self.backends.len())
            .finish_non_exhaustive()
    }
}

impl PollPipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: FanoutConfig) -> FanoutResult<Self> {
        config.validate()?;
        let backends = config
            .backends
            .iter()
            .map(|backend| (projectors::for_backend(backend), backend.batch_size()))
            .collect();
        Ok(Self {
            catalog: Arc::new(SchemaCatalog::appliance()),
            backends,
        })
    }

    /// Replace the default catalog, e.g. with a trimmed one in tests
    pub fn with_catalog(mut self, catalog: SchemaCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// The shared schema catalog
    pub fn catalog(&self) -> Arc<SchemaCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Map one snapshot for every configured backend
    pub fn run_cycle(
        &self,
        doc: &RawTelemetryDocument,
        context: &GlobalContext,
    ) -> FanoutResult<CycleOutput> {
        let start = std::time::Instant::now();

        let (records, mut warnings) =
            walker::walk(doc, &self.catalog, context).collect_cycle();
        let records_skipped = warnings.len() as u64;

        let mut outputs = Vec::with_capacity(self.backends.len());
        let mut fragments_total = 0u64;
        let mut dropped_total = 0u64;

        for (projector, batch_size) in &self.backends {
            let mut fragments = Vec::with_capacity(records.len());
            for record in &records {
                match projector.project(record) {
                    Projected::Fragment(fragment) => fragments.push(fragment),
                    Projected::Skipped => {}
                    Projected::Dropped(warning) => {
                        warn!("{}", warning);
                        warnings.push(warning);
                        dropped_total += 1;
                    }
                }
            }
            fragments_total += fragments.len() as u64;
            outputs.push(BackendOutput {
                backend: projector.name().to_string(),
                fragments,
                batch_size: *batch_size,
            });
        }

        let stats = CycleStats {
            records: records.len() as u64,
            fragments: fragments_total,
            records_skipped,
            fragments_dropped: dropped_total,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "cycle mapped: {} records, {} fragments, {} warnings",
            stats.records,
            stats.fragments,
            warnings.len()
        );

        Ok(CycleOutput {
            outputs,
            warnings,
            stats,
        })
    }
}
