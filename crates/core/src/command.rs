// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reloc_domain::{NewTask, Sector, TaskId, TaskStatus};
use time::Date;

/// A record-level workflow command, one per named transition.
///
/// Commands are data only. They carry the caller's intent and nothing the
/// engine could read from the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Approve a record awaiting approval.
    ApproveRequest {
        /// Sectors whose standard tasks are generated in the same transition.
        sectors: Vec<Sector>,
    },
    /// Reject a record awaiting approval.
    RejectRequest,
    /// Create the document draft.
    CreateDraft,
    /// Submit the draft for review.
    SubmitDraft {
        /// Optional note stored on the document.
        observation: Option<String>,
    },
    /// Start validating a submitted document.
    BeginValidation,
    /// Validate the document, completing the record.
    ValidateDocument,
    /// Invalidate the document, sending the record back to remediation.
    InvalidateDocument {
        /// Optional note stored on the document.
        observation: Option<String>,
    },
    /// Cancel the record.
    CancelRecord {
        /// Why the record was cancelled.
        reason: Option<String>,
    },
}

impl Command {
    /// The audit action name for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ApproveRequest { .. } => "ApproveRequest",
            Self::RejectRequest => "RejectRequest",
            Self::CreateDraft => "CreateDraft",
            Self::SubmitDraft { .. } => "SubmitDraft",
            Self::BeginValidation => "BeginValidation",
            Self::ValidateDocument => "ValidateDocument",
            Self::InvalidateDocument { .. } => "InvalidateDocument",
            Self::CancelRecord { .. } => "CancelRecord",
        }
    }
}

/// A task-registry command scoped to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Create a single task.
    Create(NewTask),
    /// Move a task to a new status.
    Transition {
        /// The task.
        task_id: TaskId,
        /// The requested status.
        target: TaskStatus,
    },
    /// Set or clear a task's due date.
    SetDueDate {
        /// The task.
        task_id: TaskId,
        /// The new due date.
        due_date: Option<Date>,
    },
    /// Set or clear a task's due-date extension.
    ExtendDueDate {
        /// The task.
        task_id: TaskId,
        /// The new extension.
        extension: Option<Date>,
    },
    /// Hard-delete a task.
    Delete {
        /// The task.
        task_id: TaskId,
    },
    /// Append the standard task batch for the given sectors.
    GenerateStandardTasks {
        /// The sectors to generate tasks for.
        sectors: Vec<Sector>,
    },
}

impl TaskCommand {
    /// The audit action name for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "CreateTask",
            Self::Transition { .. } => "TransitionTask",
            Self::SetDueDate { .. } => "SetTaskDueDate",
            Self::ExtendDueDate { .. } => "ExtendTaskDueDate",
            Self::Delete { .. } => "DeleteTask",
            Self::GenerateStandardTasks { .. } => "GenerateStandardTasks",
        }
    }

    /// Whether the command adds tasks to the record.
    #[must_use]
    pub const fn creates_tasks(&self) -> bool {
        matches!(self, Self::Create(_) | Self::GenerateStandardTasks { .. })
    }
}
