// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request-level status derived from its records.
//!
//! The request status is never stored. It is recomputed from the record
//! states on every read.

use crate::workflow::WorkflowState;
use serde::{Deserialize, Serialize};

/// Derived lifecycle status of a relocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// At least one record is still open.
    InProgress,
    /// Every record completed.
    Completed,
    /// At least one record was cancelled.
    Cancelled,
    /// At least one record was rejected.
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the request status from its record states.
///
/// Severity order: any rejected record, then any cancelled record, then any
/// record not yet completed (or no records at all), then completed.
#[must_use]
pub fn rollup_request_status<'a, I>(states: I) -> RequestStatus
where
    I: IntoIterator<Item = &'a WorkflowState>,
{
    let mut any_cancelled: bool = false;
    let mut any_open: bool = false;
    let mut any_record: bool = false;

    for state in states {
        any_record = true;
        match state {
            WorkflowState::RequestRejected => return RequestStatus::Rejected,
            WorkflowState::Cancelled => any_cancelled = true,
            WorkflowState::Completed => {}
            _ => any_open = true,
        }
    }

    if any_cancelled {
        RequestStatus::Cancelled
    } else if any_open || !any_record {
        RequestStatus::InProgress
    } else {
        RequestStatus::Completed
    }
}
