//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Basic fan-out example
//!
//! This example maps one appliance snapshot for three backends and hands
//! the resulting batches to a logging transport.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use fanout_core::config::{
    BackendConfig, DocumentBackendConfig, FanoutConfig, LogBackendConfig, MetricsBackendConfig,
};
use fanout_core::traits::{BatchTransport, DeliveryResult};
use fanout_core::types::{FragmentBatch, GlobalContext, RawTelemetryDocument};
use fanout_core::FanoutResult;
use fanout_mapping::{Dispatcher, PollPipeline};

/// Transport that logs every batch instead of sending it anywhere
struct LoggingTransport;

#[async_trait]
impl BatchTransport for LoggingTransport {
    async fn deliver(&self, batch: FragmentBatch) -> FanoutResult<DeliveryResult> {
        info!(
            "batch {} for {}: {} fragments",
            batch.id,
            batch.backend,
            batch.len()
        );
        Ok(DeliveryResult {
            batch_id: batch.id,
            timestamp: Utc::now(),
            fragments_delivered: batch.len(),
            duration_ms: 0,
        })
    }

    fn name(&self) -> &str {
        "logging"
    }

    async fn health_check(&self) -> FanoutResult<bool> {
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> FanoutResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting telemetry fan-out example");

    let config = FanoutConfig::new(vec![
        BackendConfig::Metrics(MetricsBackendConfig::new("metrics")),
        BackendConfig::LogEvents(LogBackendConfig::new("events").with_source("bigip")),
        BackendConfig::Document(DocumentBackendConfig::new("snapshot-store")),
    ]);
    let pipeline = PollPipeline::new(config)?;

    let doc = RawTelemetryDocument::from_value(json!({
        "system": {
            "hostname": "telemetry.bigip.com",
            "cpu": 2,
            "memory": 41,
            "configSyncSucceeded": true,
            "diskStorage": {
                "/": {"1024-blocks": 436342, "Capacity": "55%"}
            }
        },
        "virtualServers": {
            "/Common/foofoo.app/foofoo_vs": {
                "clientside.curConns": 3,
                "clientside.bitsIn": 812,
                "availabilityState": "offline",
                "enabledState": "enabled"
            }
        },
        "pools": {
            "/Common/app.app/app_pool": {
                "activeMemberCnt": 1,
                "availabilityState": "available",
                "members": {
                    "/Common/10.0.3.5:80": {
                        "addr": "10.0.3.5",
                        "port": 80,
                        "serverside.curConns": 1,
                        "monitorStatus": "up"
                    }
                }
            }
        }
    }))?;

    let context = GlobalContext::new(
        "telemetry.bigip.com",
        "cd5e51b8-74ef-44c8-985c-7965512c2e87",
        "14.0.0",
        Utc::now(),
    )
    .with_location("Seattle");

    let output = pipeline.run_cycle(&doc, &context)?;
    info!(
        "mapped {} records into {} fragments with {} warnings",
        output.stats.records,
        output.stats.fragments,
        output.warnings.len()
    );

    for backend in output.outputs {
        let dispatcher = Dispatcher::new(Box::new(LoggingTransport), backend.batch_size);
        dispatcher
            .dispatch(&backend.backend, backend.fragments)
            .await?;
    }

    info!("Fan-out example completed");
    Ok(())
}
