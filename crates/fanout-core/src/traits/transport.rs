//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Batch transport trait
//!
//! The delivery side of the pipeline. Implementations own the wire
//! protocol, credentials, and retry policy for one backend; the mapping
//! core only hands them finished batches.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FanoutResult;
use crate::types::FragmentBatch;

/// Result of delivering one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Identifier of the delivered batch
    pub batch_id: Uuid,

    /// Delivery completion time
    pub timestamp: DateTime<Utc>,

    /// Fragments accepted by the backend
    pub fragments_delivered: usize,

    /// Delivery duration in milliseconds
    pub duration_ms: u64,
}

/// Transport collaborator that carries batches to one backend
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Deliver one batch
    async fn deliver(&self, batch: FragmentBatch) -> FanoutResult<DeliveryResult>;

    /// Transport name
    fn name(&self) -> &str;

    /// Check if the destination is reachable
    async fn health_check(&self) -> FanoutResult<bool>;
}
