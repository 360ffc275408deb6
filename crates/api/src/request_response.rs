// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.
//!
//! These are distinct from domain types. Statuses, sectors and dates travel
//! as strings (`YYYY-MM-DD` dates, RFC 3339 timestamps) and identifiers as
//! plain integers.

use serde::{Deserialize, Serialize};

/// API request to open a relocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRequestRequest {
    /// `ALLOCATION`, `TRANSFER` or `TERMINATION`.
    pub request_type: String,
    /// The origin contract; absent for a new hire.
    #[serde(default)]
    pub origin_contract_id: Option<i64>,
    /// The destination contract.
    #[serde(default)]
    pub destination_contract_id: Option<i64>,
    /// Why the relocation is needed.
    pub justification: String,
    /// When the relocation was requested (`YYYY-MM-DD`).
    pub requested_on: String,
    /// Whether records start awaiting an explicit approval.
    #[serde(default)]
    pub requires_approval: bool,
    /// The employees to relocate; one record is opened for each.
    pub employee_ids: Vec<i64>,
}

/// API response for a successfully opened request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRequestResponse {
    /// The new request.
    pub request_id: i64,
    /// The new records, in the order the employees were given.
    pub record_ids: Vec<i64>,
    /// The audit event recording the opening.
    pub event_id: i64,
    /// The derived request status.
    pub request_status: String,
    /// A success message.
    pub message: String,
}

/// API request to approve a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveRequestRequest {
    /// Sectors whose standard tasks are generated on approval.
    #[serde(default)]
    pub sectors: Vec<String>,
}

/// API request carrying an optional document observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentObservationRequest {
    /// Note stored on the document.
    #[serde(default)]
    pub observation: Option<String>,
}

/// API request to cancel a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRecordRequest {
    /// Why the record is cancelled.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to create a task on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Short task type code.
    pub task_type: String,
    /// Human-readable description.
    pub description: String,
    /// `HR`, `MEDICINE` or `TRAINING`.
    pub sector: String,
    /// `LOW`, `MEDIUM` or `HIGH`; defaults to `MEDIUM`.
    #[serde(default)]
    pub priority: Option<String>,
    /// Optional due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<String>,
}

/// API request to generate the standard tasks of some sectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateStandardTasksRequest {
    /// The sectors to generate tasks for.
    pub sectors: Vec<String>,
}

/// API request to move a task to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTaskRequest {
    /// The target status.
    pub status: String,
}

/// API request to set or clear a task date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDateRequest {
    /// The new date (`YYYY-MM-DD`), or `None` to clear it.
    #[serde(default)]
    pub date: Option<String>,
}

/// API request to add or edit an observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRequest {
    /// The observation text.
    pub text: String,
}

/// API request to register an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Full name.
    pub name: String,
    /// Unique registration number.
    pub registration: String,
    /// `ACTIVE` or `INACTIVE`.
    pub activation: String,
    /// The contract the employee is currently assigned to.
    #[serde(default)]
    pub active_contract_id: Option<i64>,
}

/// API request to register a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContractRequest {
    /// Short contract code.
    pub code: String,
    /// Descriptive name.
    pub name: String,
}

/// A task as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// The task identifier.
    pub task_id: i64,
    /// Short task type code.
    pub task_type: String,
    /// Human-readable description.
    pub description: String,
    /// Owning sector.
    pub sector: String,
    /// Priority.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Due date, if set.
    pub due_date: Option<String>,
    /// Due-date extension, if set.
    pub due_date_extension: Option<String>,
    /// When the task was completed.
    pub completed_at: Option<String>,
    /// When the task was created.
    pub created_at: String,
}

/// Completion counts of one sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorProgressInfo {
    /// The sector.
    pub sector: String,
    /// Number of tasks of any status.
    pub total: usize,
    /// Number of `DONE` tasks.
    pub done: usize,
    /// Whole-number completion percentage.
    pub percent: usize,
}

/// API response describing one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResponse {
    /// The record identifier.
    pub record_id: i64,
    /// The owning request.
    pub request_id: i64,
    /// The relocated employee.
    pub employee_id: i64,
    /// Task-group status.
    pub task_group: String,
    /// Document status.
    pub document: String,
    /// Note attached to the document.
    pub document_observation: Option<String>,
    /// Who is expected to act next (`SECTORS`, `LOGISTICS` or `N/A`).
    pub responsible_actor: String,
    /// Document statuses reachable from the current state.
    pub document_targets: Vec<String>,
    /// Optimistic concurrency version.
    pub version: i64,
    /// When the record last changed.
    pub updated_at: String,
    /// The record's tasks.
    pub tasks: Vec<TaskInfo>,
    /// Per-sector completion.
    pub progress: Vec<SectorProgressInfo>,
}

/// A record summary inside a request response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// The record identifier.
    pub record_id: i64,
    /// The relocated employee.
    pub employee_id: i64,
    /// Task-group status.
    pub task_group: String,
    /// Document status.
    pub document: String,
    /// Optimistic concurrency version.
    pub version: i64,
}

/// API response describing one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestResponse {
    /// The request identifier.
    pub request_id: i64,
    /// The kind of movement.
    pub request_type: String,
    /// Origin contract.
    pub origin_contract_id: Option<i64>,
    /// Destination contract.
    pub destination_contract_id: Option<i64>,
    /// Who asked for the relocation.
    pub requested_by: String,
    /// Why the relocation is needed.
    pub justification: String,
    /// When the relocation was requested.
    pub requested_on: String,
    /// Whether records started awaiting approval.
    pub requires_approval: bool,
    /// Status derived from the records.
    pub status: String,
    /// The request's records.
    pub records: Vec<RecordSummary>,
}

/// API response for a successful record or task change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    /// The audit event recording the change.
    pub event_id: i64,
    /// The action that was applied.
    pub action: String,
    /// The request status before the change.
    pub previous_request_status: String,
    /// The request status after the change.
    pub request_status: String,
    /// Identifiers of tasks created by the change.
    pub created_task_ids: Vec<i64>,
    /// The record after the change.
    pub record: RecordResponse,
}

/// An observation as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationResponse {
    /// The observation identifier.
    pub observation_id: i64,
    /// The task it is attached to.
    pub task_id: i64,
    /// The observation text.
    pub text: String,
    /// Who wrote the observation.
    pub author: String,
    /// When it was written.
    pub created_at: String,
    /// Who last edited it.
    pub modified_by: Option<String>,
    /// When it was last edited.
    pub modified_at: Option<String>,
}

/// API response for an observation delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteObservationResponse {
    /// The observation identifier.
    pub observation_id: i64,
    /// Whether an observation was actually removed.
    pub deleted: bool,
}

/// An audit event as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventResponse {
    /// The event identifier.
    pub event_id: i64,
    /// Who performed the action.
    pub actor_id: String,
    /// The actor's role.
    pub actor_type: String,
    /// The cause identifier.
    pub cause_id: String,
    /// The action name.
    pub action: String,
    /// Optional action details.
    pub details: Option<String>,
    /// The state before the action.
    pub before: String,
    /// The state after the action.
    pub after: String,
}

/// An employee as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    /// The employee identifier.
    pub employee_id: i64,
    /// Full name.
    pub name: String,
    /// Registration number.
    pub registration: String,
    /// `ACTIVE` or `INACTIVE`.
    pub activation: String,
    /// Whether the employee takes part in a relocation.
    pub in_migration: bool,
    /// The current contract.
    pub active_contract_id: Option<i64>,
}

/// A contract as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractResponse {
    /// The contract identifier.
    pub contract_id: i64,
    /// Short contract code.
    pub code: String,
    /// Descriptive name.
    pub name: String,
}
