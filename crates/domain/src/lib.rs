// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod progress;
mod rollup;
mod standard_tasks;
mod task;
mod task_status;
mod types;
mod validation;
mod workflow;

#[cfg(test)]
mod tests;

pub use error::{DomainError, EntityKind};
pub use progress::{SectorProgress, sector_progress};
pub use rollup::{RequestStatus, rollup_request_status};
pub use standard_tasks::{StandardTask, standard_task_batch, standard_tasks};
pub use task::{NewTask, Observation, Task, tasks_concluded};
pub use task_status::TaskStatus;
pub use types::{
    ActivationState, Contract, ContractId, Employee, EmployeeId, ObservationId, Priority,
    RecordId, RelocationRecord, RelocationRequest, RequestId, RequestType, Sector, TaskId,
};
pub use validation::{
    DATE_FORMAT, format_date, parse_date, validate_contract_fields, validate_employee_fields,
    validate_observation, validate_request, validate_task_fields,
};
pub use workflow::{
    DocumentStatus, DraftDocument, Guard, ReadyDocument, ResponsibleActor, TaskGroupStatus,
    WorkflowAxes, WorkflowState,
};
