// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::effects::Effect;
use reloc_audit::{AuditEvent, StateSnapshot};
use reloc_domain::{
    EmployeeId, RecordId, RelocationRecord, RelocationRequest, RequestId, RequestType, Task,
    TaskId, WorkflowState,
};

/// Everything the engine needs to evaluate a transition on one record.
///
/// State is scoped to a single relocation record together with its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordState {
    /// The record this state is scoped to.
    pub record_id: RecordId,
    /// The owning request's type, which decides validation effects.
    pub request_type: RequestType,
    /// The record itself.
    pub record: RelocationRecord,
    /// All tasks of the record.
    pub tasks: Vec<Task>,
}

impl RecordState {
    /// Creates a record state.
    #[must_use]
    pub const fn new(
        record_id: RecordId,
        request_type: RequestType,
        record: RelocationRecord,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            record_id,
            request_type,
            record,
            tasks,
        }
    }

    /// The owning request.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.record.request_id
    }

    /// The relocated employee.
    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.record.employee_id
    }

    /// The composite workflow state.
    #[must_use]
    pub const fn workflow(&self) -> WorkflowState {
        self.record.state
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "record={},state={},tasks_count={}",
            self.record_id,
            self.record.state,
            self.tasks.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// new state, effects or audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    ///
    /// Tasks without an identifier were created by this transition.
    pub new_state: RecordState,
    /// Tasks removed by this transition.
    pub deleted_tasks: Vec<TaskId>,
    /// Employee effects to apply in the same transaction.
    pub effects: Vec<Effect>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of opening a relocation request.
///
/// The request and its records have no identifiers yet; they are assigned
/// when the result is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequestResult {
    /// The validated request.
    pub request: RelocationRequest,
    /// One record is created per employee, in this order.
    pub employees: Vec<EmployeeId>,
    /// The state every new record starts in.
    pub initial_state: WorkflowState,
    /// Employee effects to apply in the same transaction.
    pub effects: Vec<Effect>,
    /// The audit event recording the opening.
    pub audit_event: AuditEvent,
}
