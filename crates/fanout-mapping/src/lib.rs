//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Appliance telemetry mapping engine
//!
//! This crate turns one raw appliance snapshot per poll cycle into
//! backend-ready payload fragments: a schema catalog classifies every
//! known field, a tree walker flattens the snapshot into normalized
//! records with deterministic tag sets, per-backend projectors render the
//! records, and a batching stage hands finished batches to the transport
//! collaborator.

pub mod batch;
pub mod catalog;
pub mod pipeline;
pub mod projectors;
pub mod tags;
pub mod walker;

// Re-export commonly used types
pub use batch::{into_batches, Dispatcher};
pub use catalog::{EntitySchema, FieldKind, SchemaCatalog};
pub use pipeline::{BackendOutput, CycleOutput, CycleStats, PollPipeline};
pub use walker::{walk, RecordWalk};
