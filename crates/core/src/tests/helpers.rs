// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EmployeeDirectory, RecordState};
use reloc_audit::{Actor, Cause};
use reloc_domain::{
    ActivationState, ContractId, EmployeeId, NewTask, Priority, RecordId, RelocationRecord,
    RequestId, RequestType, Sector, Task, TaskId, TaskStatus, WorkflowState,
};
use std::collections::HashMap;
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("ana"), String::from("logistics"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Logistics request"))
}

pub fn new_task(sector: Sector, task_type: &str) -> NewTask {
    NewTask {
        task_type: String::from(task_type),
        description: format!("{task_type} for the relocation"),
        sector,
        priority: Priority::Medium,
        due_date: None,
    }
}

/// Builds a persisted task with the given id and status.
pub fn task(id: i64, sector: Sector, status: TaskStatus) -> Task {
    let mut task: Task = Task::new(RecordId::new(1), new_task(sector, "ASO"), NOW);
    task.task_id = Some(TaskId::new(id));
    task.status = status;
    task
}

/// Builds record 1 of request 1 for employee 10.
pub fn record_state(
    request_type: RequestType,
    state: WorkflowState,
    tasks: Vec<Task>,
) -> RecordState {
    let mut record: RelocationRecord =
        RelocationRecord::new(RequestId::new(1), EmployeeId::new(10), false, NOW);
    record.record_id = Some(RecordId::new(1));
    record.state = state;
    RecordState::new(RecordId::new(1), request_type, record, tasks)
}

/// An employee as the directory stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub activation: ActivationState,
    pub in_migration: bool,
    pub active_contract: Option<ContractId>,
}

/// In-memory directory used to observe effects.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    pub employees: HashMap<EmployeeId, EmployeeRow>,
}

impl InMemoryDirectory {
    pub fn with_employee(employee_id: EmployeeId, activation: ActivationState) -> Self {
        let mut directory: Self = Self::default();
        directory.employees.insert(
            employee_id,
            EmployeeRow {
                activation,
                in_migration: true,
                active_contract: Some(ContractId::new(100)),
            },
        );
        directory
    }

    pub fn row(&self, employee_id: EmployeeId) -> &EmployeeRow {
        self.employees.get(&employee_id).unwrap()
    }

    fn row_mut(&mut self, employee_id: EmployeeId) -> Result<&mut EmployeeRow, String> {
        self.employees
            .get_mut(&employee_id)
            .ok_or_else(|| format!("employee {employee_id} not found"))
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    type Error = String;

    fn set_activation_state(
        &mut self,
        employee_id: EmployeeId,
        state: ActivationState,
    ) -> Result<(), Self::Error> {
        self.row_mut(employee_id)?.activation = state;
        Ok(())
    }

    fn clear_active_contract(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        self.row_mut(employee_id)?.active_contract = None;
        Ok(())
    }

    fn clear_in_migration(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        self.row_mut(employee_id)?.in_migration = false;
        Ok(())
    }

    fn mark_in_migration(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        self.row_mut(employee_id)?.in_migration = true;
        Ok(())
    }
}
