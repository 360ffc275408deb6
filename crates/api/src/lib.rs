// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the relocation workflow engine.
//!
//! Handlers authorize the actor, load the record from persistence, evaluate
//! the command with the core engine and persist the result in one
//! transaction. Errors from every layer are translated into [`ApiError`].

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

mod auth;
mod error;
mod handlers;
mod request_response;
mod views;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    DEFAULT_MAX_CONFLICT_RETRIES, add_observation, apply_record_command, approve_request,
    create_contract, create_employee, create_task, delete_observation, delete_task,
    extend_task_due_date, generate_standard_tasks, get_contract, get_employee, get_record,
    get_record_audit, get_request, list_observations, open_request, retry_on_conflict,
    set_task_due_date, transition_task, update_observation,
};
pub use request_response::{
    ApproveRequestRequest, AuditEventResponse, CancelRecordRequest, ContractResponse,
    CreateContractRequest, CreateEmployeeRequest, CreateTaskRequest, DeleteObservationResponse,
    DocumentObservationRequest, EmployeeResponse, GenerateStandardTasksRequest,
    ObservationRequest, ObservationResponse, OpenRequestRequest, OpenRequestResponse,
    RecordResponse, RecordSummary, RequestResponse, SectorProgressInfo, TaskDateRequest,
    TaskInfo, TransitionResponse, TransitionTaskRequest,
};
