//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Per-cycle global context
//!
//! The surrounding process supplies one context per poll cycle: device
//! identity plus the cycle start time. The context is threaded through the
//! walker and tag composer explicitly; there is no shared mutable state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tags::TagSet;

/// Device identity and cycle constants attached to every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalContext {
    /// Device hostname
    pub hostname: String,

    /// Device machine id
    pub machine_id: String,

    /// Product version
    pub version: String,

    /// Device location
    pub location: Option<String>,

    /// Device description
    pub description: Option<String>,

    /// Cycle start time; every record of the cycle carries its epoch
    pub poll_start: DateTime<Utc>,
}

impl GlobalContext {
    /// Create a new context for one poll cycle
    pub fn new(
        hostname: impl Into<String>,
        machine_id: impl Into<String>,
        version: impl Into<String>,
        poll_start: DateTime<Utc>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            machine_id: machine_id.into(),
            version: version.into(),
            location: None,
            description: None,
            poll_start,
        }
    }

    /// Set the device location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the device description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Cycle timestamp as epoch seconds
    pub fn epoch(&self) -> i64 {
        self.poll_start.timestamp()
    }

    /// The context tag block; composed last, so these keys always win
    pub fn context_tags(&self) -> TagSet {
        let mut tags = TagSet::new();
        tags.set("host", &self.hostname);
        tags.set("machineId", &self.machine_id);
        tags.set("version", &self.version);
        if let Some(location) = &self.location {
            tags.set("location", location);
        }
        if let Some(description) = &self.description {
            tags.set("description", description);
        }
        tags
    }
}
