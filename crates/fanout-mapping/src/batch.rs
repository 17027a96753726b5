//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Batching and dispatch
//!
//! Projected fragments are grouped into network-sized batches and handed
//! to the transport collaborator. Chunking is pure; delivery, retry, and
//! credentials all live behind the `BatchTransport` trait.

use tracing::{debug, info};

use fanout_core::error::FanoutResult;
use fanout_core::traits::{BatchTransport, DeliveryResult};
use fanout_core::types::{FragmentBatch, PayloadFragment};

/// Chunk fragments into batches of at most `batch_size`
pub fn into_batches(
    backend: &str,
    fragments: Vec<PayloadFragment>,
    batch_size: usize,
) -> Vec<FragmentBatch> {
    debug_assert!(batch_size > 0);
    let mut batches = Vec::with_capacity(fragments.len().div_ceil(batch_size.max(1)));
    let mut chunk = Vec::with_capacity(batch_size.min(fragments.len()));
    for fragment in fragments {
        chunk.push(fragment);
        if chunk.len() == batch_size {
            batches.push(FragmentBatch::new(backend, std::mem::take(&mut chunk)));
        }
    }
    if !chunk.is_empty() {
        batches.push(FragmentBatch::new(backend, chunk));
    }
    batches
}

/// Forwards one backend's batches to its transport
pub struct Dispatcher {
    transport: Box<dyn BatchTransport>,
    batch_size: usize,
}

impl Dispatcher {
    /// Create a dispatcher over a transport
    pub fn new(transport: Box<dyn BatchTransport>, batch_size: usize) -> Self {
        Self {
            transport,
            batch_size,
        }
    }

    /// Transport name
    pub fn name(&self) -> &str {
        self.transport.name()
    }

    /// Batch and deliver one cycle's fragments for one backend
    pub async fn dispatch(
        &self,
        backend: &str,
        fragments: Vec<PayloadFragment>,
    ) -> FanoutResult<Vec<DeliveryResult>> {
        let batches = into_batches(backend, fragments, self.batch_size);
        debug!(
            "dispatching {} batches to {} via {}",
            batches.len(),
            backend,
            self.transport.name()
        );

        let mut results = Vec::with_capacity(batches.len());
        for batch in batches {
            let batch_id = batch.id;
            let result = self.transport.deliver(batch).await?;
            info!(
                "delivered batch {} ({} fragments) to {}",
                batch_id, result.fragments_delivered, backend
            );
            results.push(result);
        }
        Ok(results)
    }
}
