//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Record projector trait
//!
//! One projector per target backend family. Projection is a pure,
//! stateless mapping: record in, at most one fragment out. Batching
//! decisions live elsewhere.

use crate::error::CycleWarning;
use crate::types::{NormalizedRecord, PayloadFragment};

/// Outcome of projecting one record for one backend
#[derive(Debug, Clone, PartialEq)]
pub enum Projected {
    /// The record maps to one payload fragment
    Fragment(PayloadFragment),

    /// The record does not apply to this backend; not an error
    Skipped,

    /// The record violates the backend's constraints; surfaced as a warning
    Dropped(CycleWarning),
}

impl Projected {
    /// Fragment view, if projection produced one
    pub fn into_fragment(self) -> Option<PayloadFragment> {
        match self {
            Projected::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }
}

/// Stateless mapping from normalized records to backend payload fragments
pub trait RecordProjector: Send + Sync {
    /// Project one record into the backend's event shape
    fn project(&self, record: &NormalizedRecord) -> Projected;

    /// Backend name this projector serves
    fn name(&self) -> &str;
}
