// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tasks owned by a relocation record and the observations attached to them.

use crate::error::{DomainError, EntityKind};
use crate::task_status::TaskStatus;
use crate::types::{ObservationId, Priority, RecordId, Sector, TaskId};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Fields supplied by a caller when creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task type code (e.g. `ASO`).
    pub task_type: String,
    /// Human-readable description.
    pub description: String,
    /// Owning sector.
    pub sector: Sector,
    /// Priority.
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<Date>,
}

/// A unit of sector work belonging to a relocation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Canonical identifier, `None` until persisted.
    pub task_id: Option<TaskId>,
    /// Owning record.
    pub record_id: RecordId,
    /// Task type code.
    pub task_type: String,
    /// Human-readable description.
    pub description: String,
    /// Owning sector.
    pub sector: Sector,
    /// Priority.
    pub priority: Priority,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: Option<Date>,
    /// Extended due date (medicine and training only).
    pub due_date_extension: Option<Date>,
    /// When the task reached `DONE`.
    pub completed_at: Option<OffsetDateTime>,
    /// When the task was created.
    pub created_at: OffsetDateTime,
}

impl Task {
    /// Creates a new pending task for a record.
    #[must_use]
    pub fn new(record_id: RecordId, new_task: NewTask, created_at: OffsetDateTime) -> Self {
        Self {
            task_id: None,
            record_id,
            task_type: new_task.task_type,
            description: new_task.description,
            sector: new_task.sector,
            priority: new_task.priority,
            status: TaskStatus::Pending,
            due_date: new_task.due_date,
            due_date_extension: None,
            completed_at: None,
            created_at,
        }
    }

    /// Moves the task to a new status, stamping completion on `DONE`.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` from a terminal status and `InvalidState` for
    /// edges that do not exist.
    pub fn transition(
        &mut self,
        target: TaskStatus,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.status.validate_transition(target)?;
        self.status = target;
        if target == TaskStatus::Done {
            self.completed_at = Some(now);
        }
        Ok(())
    }

    fn ensure_not_done(&self) -> Result<(), DomainError> {
        if self.status == TaskStatus::Done {
            return Err(DomainError::TerminalState {
                entity: EntityKind::Task,
                state: self.status.as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Sets or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` once the task is `DONE`.
    pub fn set_due_date(&mut self, due_date: Option<Date>) -> Result<(), DomainError> {
        self.ensure_not_done()?;
        self.due_date = due_date;
        Ok(())
    }

    /// Sets or clears the due-date extension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for HR tasks and `TerminalState` once the task
    /// is `DONE`.
    pub fn extend_due_date(&mut self, extension: Option<Date>) -> Result<(), DomainError> {
        if !self.sector.allows_due_date_extension() {
            return Err(DomainError::InvalidState {
                entity: EntityKind::Task,
                reason: format!("{} tasks do not accept due-date extensions", self.sector),
            });
        }
        self.ensure_not_done()?;
        self.due_date_extension = extension;
        Ok(())
    }

    /// Checks that the task may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` once the task is `DONE`.
    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        if self.status == TaskStatus::Done {
            return Err(DomainError::InvalidState {
                entity: EntityKind::Task,
                reason: "completed tasks cannot be deleted".to_string(),
            });
        }
        Ok(())
    }

    /// Cancels the task unless it is already `DONE`.
    ///
    /// Returns true if the status changed.
    pub fn cancel(&mut self) -> bool {
        match self.status {
            TaskStatus::Done | TaskStatus::Cancelled => false,
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Rejected => {
                self.status = TaskStatus::Cancelled;
                true
            }
        }
    }
}

/// Whether a task set allows the draft to be submitted.
///
/// A concluded set has at least one task and every task is `DONE`. A
/// `REJECTED` task blocks submission until it is deleted.
#[must_use]
pub fn tasks_concluded(tasks: &[Task]) -> bool {
    !tasks.is_empty() && tasks.iter().all(|t| t.status == TaskStatus::Done)
}

/// A freeform note attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Canonical identifier, `None` until persisted.
    pub observation_id: Option<ObservationId>,
    /// Owning task.
    pub task_id: TaskId,
    /// Note text.
    pub text: String,
    /// Original author; never changes.
    pub author: String,
    /// When the note was written.
    pub created_at: OffsetDateTime,
    /// Last editor.
    pub modified_by: Option<String>,
    /// When the note was last edited.
    pub modified_at: Option<OffsetDateTime>,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        text: String,
        author: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            observation_id: None,
            task_id,
            text,
            author,
            created_at,
            modified_by: None,
            modified_at: None,
        }
    }

    /// Replaces the text, keeping the original author.
    pub fn edit(&mut self, text: String, modifier: String, now: OffsetDateTime) {
        self.text = text;
        self.modified_by = Some(modifier);
        self.modified_at = Some(now);
    }
}
