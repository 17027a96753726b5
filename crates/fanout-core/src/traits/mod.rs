//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Boundary traits for the telemetry fan-out pipeline
//!
//! Two seams: the stateless record-to-fragment projector implemented per
//! backend family, and the async transport collaborator that carries
//! finished batches off-process.

pub mod projector;
pub mod transport;

// Re-export commonly used types
pub use projector::{Projected, RecordProjector};
pub use transport::{BatchTransport, DeliveryResult};
