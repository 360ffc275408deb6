// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{EmployeeId, ObservationId, RecordId, TaskId};
use crate::workflow::{DocumentStatus, Guard, TaskGroupStatus};

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A relocation request.
    Request,
    /// A relocation record (one employee within a request).
    Record,
    /// A task owned by a record.
    Task,
    /// An observation attached to a task.
    Observation,
    /// A referenced employee.
    Employee,
}

impl EntityKind {
    /// Returns the display name of the entity kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "Relocation request",
            Self::Record => "Relocation record",
            Self::Task => "Task",
            Self::Observation => "Observation",
            Self::Employee => "Employee",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during domain validation and workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The attempted transition's precondition does not hold.
    #[error(
        "Guard not satisfied: {guard} (task group: {task_group}, document: {document})"
    )]
    GuardNotSatisfied {
        /// The unmet guard.
        guard: Guard,
        /// The task-group status at the time of the attempt.
        task_group: TaskGroupStatus,
        /// The document status at the time of the attempt.
        document: DocumentStatus,
    },
    /// The entity is in a terminal status and accepts no further transitions.
    #[error("{entity} is in terminal state {state}")]
    TerminalState {
        /// The entity kind.
        entity: EntityKind,
        /// The terminal status.
        state: String,
    },
    /// A structural rule blocks the operation in the current state.
    #[error("Invalid state for {entity}: {reason}")]
    InvalidState {
        /// The entity kind.
        entity: EntityKind,
        /// The specific blocking condition.
        reason: String,
    },
    /// A stored pair of statuses does not form a valid composite workflow state.
    #[error("Impossible workflow state: task group {task_group}, document {document}")]
    ImpossibleWorkflowState {
        /// The task-group status.
        task_group: TaskGroupStatus,
        /// The document status.
        document: DocumentStatus,
    },
    /// A status string could not be parsed.
    #[error("Invalid {kind}: '{value}'")]
    InvalidStatus {
        /// What kind of status was being parsed.
        kind: &'static str,
        /// The offending value.
        value: String,
    },
    /// The task does not belong to the record.
    #[error("Task {0} not found")]
    TaskNotFound(TaskId),
    /// The observation does not exist.
    #[error("Observation {0} not found")]
    ObservationNotFound(ObservationId),
    /// The employee already takes part in an open relocation.
    #[error("Employee {employee_id} already has an open relocation record {record_id}")]
    EmployeeAlreadyInRelocation {
        /// The employee.
        employee_id: EmployeeId,
        /// The open record.
        record_id: RecordId,
    },
    /// A request must contain at least one employee.
    #[error("A relocation request must include at least one employee")]
    EmptyRequest,
    /// The same employee appears twice in one request.
    #[error("Employee {0} appears more than once in the request")]
    DuplicateEmployee(EmployeeId),
    /// Task type or description is empty or invalid.
    #[error("Invalid task: {0}")]
    InvalidTask(String),
    /// Observation text is empty or invalid.
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),
    /// Request fields are empty or invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Employee fields are empty or invalid.
    #[error("Invalid employee: {0}")]
    InvalidEmployee(String),
    /// Contract fields are empty or invalid.
    #[error("Invalid contract: {0}")]
    InvalidContract(String),
    /// Failed to parse a date from a string.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}
