// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task status tracking and transition logic.
//!
//! Sector staff drive tasks from `PENDING` to `DONE`. `REJECTED` is a failed
//! outcome that can only be remediated by creating a new task. `CANCELLED`
//! is never requested directly; it is set when the owning record is
//! cancelled.

use crate::error::{DomainError, EntityKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    Pending,
    /// Being worked on
    InProgress,
    /// Finished successfully
    Done,
    /// Failed; needs a replacement task
    Rejected,
    /// Cancelled along with the record
    Cancelled,
}

impl TaskStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                kind: "task status",
                value: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Rejected | Self::Cancelled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` if this status is terminal and `InvalidState`
    /// if the edge does not exist.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::TerminalState {
                entity: EntityKind::Task,
                state: self.as_str().to_string(),
            });
        }

        let valid: bool = match self {
            Self::Pending => matches!(
                new_status,
                Self::InProgress | Self::Done | Self::Rejected
            ),
            Self::InProgress => matches!(new_status, Self::Done | Self::Rejected),
            Self::Done | Self::Rejected | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidState {
                entity: EntityKind::Task,
                reason: format!(
                    "transition from {} to {} is not permitted",
                    self.as_str(),
                    new_status.as_str()
                ),
            })
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
