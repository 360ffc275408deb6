// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One handler per API operation.
//!
//! Every handler authorizes first, then loads, evaluates and persists.
//! Record and task changes are re-evaluated against fresh state when the
//! write loses a version race, up to a caller-supplied bound.

use reloc::{Command, RecordState, TaskCommand, TransitionResult, apply, apply_task};
use reloc_audit::Cause;
use reloc_domain::{
    ActivationState, Contract, ContractId, DomainError, Employee, EmployeeId, NewTask,
    Observation, ObservationId, Priority, RecordId, RelocationRecord, RelocationRequest,
    RequestId, RequestStatus, RequestType, Sector, TaskId, TaskStatus, format_date, parse_date,
    rollup_request_status, validate_contract_fields, validate_employee_fields,
    validate_observation,
};
use reloc_persistence::{Persistence, PersistenceError};
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ApproveRequestRequest, AuditEventResponse, ContractResponse, CreateContractRequest,
    CreateEmployeeRequest, CreateTaskRequest, DeleteObservationResponse, EmployeeResponse,
    GenerateStandardTasksRequest, ObservationRequest, ObservationResponse, OpenRequestRequest,
    OpenRequestResponse, RecordResponse, RecordSummary, RequestResponse, TaskDateRequest,
    TransitionResponse, TransitionTaskRequest,
};
use crate::views::{
    audit_event_response, contract_response, employee_response, observation_response,
    record_response, record_summary,
};

/// Default bound on re-evaluations after a concurrent modification.
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

/// Runs `attempt`, running it again while it fails with
/// `ConcurrentModification`, at most `max_retries` more times.
///
/// Each attempt must reload the state it evaluates so that every guard is
/// checked against the winning write.
///
/// # Errors
///
/// Returns the last attempt's error once retries are exhausted, or any
/// other error immediately.
pub fn retry_on_conflict<T, F>(max_retries: u32, mut attempt: F) -> Result<T, ApiError>
where
    F: FnMut() -> Result<T, ApiError>,
{
    let mut retries: u32 = 0;
    loop {
        match attempt() {
            Err(ApiError::ConcurrentModification {
                record_id,
                expected_version,
            }) if retries < max_retries => {
                retries += 1;
                warn!(
                    record_id = %record_id,
                    expected_version,
                    retry = retries,
                    "Concurrent modification, re-evaluating"
                );
            }
            other => return other,
        }
    }
}

// ============================================================================
// Requests and records
// ============================================================================

/// Opens a relocation request with one record per employee.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request
/// * `authenticated_actor` - The authenticated actor making the request
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - A field is invalid or no employee is named
/// - An employee already has an open relocation record
/// - A referenced employee or contract does not exist
pub fn open_request(
    persistence: &mut Persistence,
    request: &OpenRequestRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<OpenRequestResponse, ApiError> {
    AuthorizationService::authorize_logistics(authenticated_actor, "OpenRequest")?;

    let request_type: RequestType = request
        .request_type
        .parse()
        .map_err(translate_domain_error)?;
    let requested_on: Date = parse_date(&request.requested_on).map_err(translate_domain_error)?;
    let relocation_request = RelocationRequest {
        request_id: None,
        request_type,
        origin_contract: request.origin_contract_id.map(ContractId::new),
        destination_contract: request.destination_contract_id.map(ContractId::new),
        requested_by: authenticated_actor.id.clone(),
        justification: request.justification.clone(),
        requested_on,
        requires_approval: request.requires_approval,
    };
    let employees: Vec<EmployeeId> = request
        .employee_ids
        .iter()
        .copied()
        .map(EmployeeId::new)
        .collect();

    let open_records: Vec<(EmployeeId, RecordId)> = persistence
        .list_open_records_for(&employees)
        .map_err(translate_persistence_error)?;
    let result = reloc::open_request(
        relocation_request,
        employees,
        &open_records,
        authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let opened = persistence
        .persist_open_request(&result, OffsetDateTime::now_utc())
        .map_err(translate_persistence_error)?;
    let status: RequestStatus = request_status_of(persistence, opened.request_id)?;

    info!(
        request_id = %opened.request_id,
        records = opened.record_ids.len(),
        actor = %authenticated_actor.id,
        "Opened relocation request"
    );

    Ok(OpenRequestResponse {
        request_id: opened.request_id.value(),
        record_ids: opened.record_ids.iter().map(RecordId::value).collect(),
        event_id: opened.event_id,
        request_status: status.to_string(),
        message: format!(
            "Opened {request_type} request with {} record(s)",
            opened.record_ids.len()
        ),
    })
}

/// Retrieves a request with its records and derived status.
///
/// # Errors
///
/// Returns an error if the request does not exist.
pub fn get_request(
    persistence: &mut Persistence,
    request_id: RequestId,
) -> Result<RequestResponse, ApiError> {
    let request: RelocationRequest = persistence
        .get_request(request_id)
        .map_err(translate_persistence_error)?;
    let records: Vec<RelocationRecord> = persistence
        .list_records_for_request(request_id)
        .map_err(translate_persistence_error)?;
    let status: RequestStatus = rollup_request_status(records.iter().map(|r| &r.state));
    let summaries: Vec<RecordSummary> = records
        .iter()
        .map(record_summary)
        .collect::<Result<_, _>>()?;

    Ok(RequestResponse {
        request_id: request_id.value(),
        request_type: request.request_type.to_string(),
        origin_contract_id: request.origin_contract.map(|c| c.value()),
        destination_contract_id: request.destination_contract.map(|c| c.value()),
        requested_by: request.requested_by,
        justification: request.justification,
        requested_on: format_date(request.requested_on)
            .map_err(translate_domain_error)?,
        requires_approval: request.requires_approval,
        status: status.to_string(),
        records: summaries,
    })
}

/// Retrieves a record with its tasks, progress and valid document targets.
///
/// # Errors
///
/// Returns an error if the record does not exist.
pub fn get_record(
    persistence: &mut Persistence,
    record_id: RecordId,
) -> Result<RecordResponse, ApiError> {
    let state: RecordState = persistence
        .load_record_state(record_id)
        .map_err(translate_persistence_error)?;
    record_response(&state)
}

/// Applies a record-level workflow command.
///
/// The record is reloaded and the command re-evaluated when another write
/// wins the version race.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `record_id` - The record to change
/// * `command` - The workflow command
/// * `authenticated_actor` - The authenticated actor making the request
/// * `cause` - The cause or reason for this action
/// * `max_retries` - Re-evaluations allowed after a concurrent modification
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized
/// - The record does not exist or is terminal
/// - A guard of the transition does not hold
/// - The record keeps changing concurrently beyond `max_retries`
pub fn apply_record_command(
    persistence: &mut Persistence,
    record_id: RecordId,
    command: &Command,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    AuthorizationService::authorize_record_command(authenticated_actor, command)?;

    retry_on_conflict(max_retries, || {
        let state: RecordState = persistence
            .load_record_state(record_id)
            .map_err(translate_persistence_error)?;
        let previous: RequestStatus = request_status_of(persistence, state.request_id())?;
        let result: TransitionResult = apply(
            &state,
            command.clone(),
            authenticated_actor.to_audit_actor(),
            cause.clone(),
            OffsetDateTime::now_utc(),
        )
        .map_err(translate_core_error)?;
        commit_transition(persistence, &state, &result, previous)
    })
}

/// Approves a record, generating standard tasks for the listed sectors.
///
/// # Errors
///
/// Returns an error if a sector is unknown or the approval fails.
pub fn approve_request(
    persistence: &mut Persistence,
    record_id: RecordId,
    request: &ApproveRequestRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    let command = Command::ApproveRequest {
        sectors: parse_sectors(&request.sectors)?,
    };
    apply_record_command(
        persistence,
        record_id,
        &command,
        authenticated_actor,
        cause,
        max_retries,
    )
}

/// Lists a record's audit timeline, oldest first.
///
/// # Errors
///
/// Returns an error if the record does not exist.
pub fn get_record_audit(
    persistence: &mut Persistence,
    record_id: RecordId,
) -> Result<Vec<AuditEventResponse>, ApiError> {
    persistence
        .load_record_state(record_id)
        .map_err(translate_persistence_error)?;
    persistence
        .get_audit_timeline(record_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(audit_event_response)
        .collect()
}

// ============================================================================
// Tasks
// ============================================================================

/// Creates a task on a record.
///
/// # Errors
///
/// Returns an error if:
/// - A field is invalid
/// - The actor may not manage the task's sector
/// - The record does not accept new tasks in its current state
pub fn create_task(
    persistence: &mut Persistence,
    record_id: RecordId,
    request: &CreateTaskRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    let sector: Sector = request.sector.parse().map_err(translate_domain_error)?;
    let priority: Priority = match &request.priority {
        Some(value) => value.parse().map_err(translate_domain_error)?,
        None => Priority::default(),
    };
    AuthorizationService::authorize_sector(authenticated_actor, sector, "CreateTask")?;

    let new_task = NewTask {
        task_type: request.task_type.clone(),
        description: request.description.clone(),
        sector,
        priority,
        due_date: parse_optional_date(request.due_date.as_deref())?,
    };
    run_task_command(
        persistence,
        record_id,
        authenticated_actor,
        cause,
        max_retries,
        |_| Ok(TaskCommand::Create(new_task.clone())),
    )
}

/// Appends the standard tasks of the listed sectors to a record.
///
/// # Errors
///
/// Returns an error if a sector is unknown, the actor may not manage one of
/// the sectors, the catalogue has no tasks for them, or the record does not
/// accept new tasks.
pub fn generate_standard_tasks(
    persistence: &mut Persistence,
    record_id: RecordId,
    request: &GenerateStandardTasksRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    let sectors: Vec<Sector> = parse_sectors(&request.sectors)?;
    for sector in &sectors {
        AuthorizationService::authorize_sector(
            authenticated_actor,
            *sector,
            "GenerateStandardTasks",
        )?;
    }
    run_task_command(
        persistence,
        record_id,
        authenticated_actor,
        cause,
        max_retries,
        |_| {
            Ok(TaskCommand::GenerateStandardTasks {
                sectors: sectors.clone(),
            })
        },
    )
}

/// Moves a task to a new status.
///
/// # Errors
///
/// Returns an error if the task does not exist, the actor may not manage its
/// sector, or the task lifecycle rejects the move.
pub fn transition_task(
    persistence: &mut Persistence,
    task_id: TaskId,
    request: &TransitionTaskRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    let target: TaskStatus = request.status.parse().map_err(translate_domain_error)?;
    run_task_scoped(
        persistence,
        task_id,
        authenticated_actor,
        cause,
        max_retries,
        TaskCommand::Transition { task_id, target },
    )
}

/// Sets or clears a task's due date.
///
/// # Errors
///
/// Returns an error if the date is malformed, the task does not exist, the
/// actor may not manage its sector, or the task is done.
pub fn set_task_due_date(
    persistence: &mut Persistence,
    task_id: TaskId,
    request: &TaskDateRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    let due_date: Option<Date> = parse_optional_date(request.date.as_deref())?;
    run_task_scoped(
        persistence,
        task_id,
        authenticated_actor,
        cause,
        max_retries,
        TaskCommand::SetDueDate { task_id, due_date },
    )
}

/// Sets or clears a task's due-date extension.
///
/// # Errors
///
/// Returns an error if the date is malformed, the task does not exist, the
/// actor may not manage its sector, the sector does not allow extensions,
/// or the task is done.
pub fn extend_task_due_date(
    persistence: &mut Persistence,
    task_id: TaskId,
    request: &TaskDateRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    let extension: Option<Date> = parse_optional_date(request.date.as_deref())?;
    run_task_scoped(
        persistence,
        task_id,
        authenticated_actor,
        cause,
        max_retries,
        TaskCommand::ExtendDueDate { task_id, extension },
    )
}

/// Deletes a task.
///
/// # Errors
///
/// Returns an error if the task does not exist, the actor may not manage its
/// sector, or the task is done.
pub fn delete_task(
    persistence: &mut Persistence,
    task_id: TaskId,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
) -> Result<TransitionResponse, ApiError> {
    run_task_scoped(
        persistence,
        task_id,
        authenticated_actor,
        cause,
        max_retries,
        TaskCommand::Delete { task_id },
    )
}

// ============================================================================
// Observations
// ============================================================================

/// Adds an observation to a task, authored by the actor.
///
/// # Errors
///
/// Returns an error if the task does not exist, the actor may not manage its
/// sector, or the text is blank.
pub fn add_observation(
    persistence: &mut Persistence,
    task_id: TaskId,
    request: &ObservationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ObservationResponse, ApiError> {
    let sector: Sector = sector_of_task(persistence, task_id)?;
    AuthorizationService::authorize_sector(authenticated_actor, sector, "AddObservation")?;
    validate_observation(&request.text, &authenticated_actor.id)
        .map_err(translate_domain_error)?;

    let observation = Observation::new(
        task_id,
        request.text.clone(),
        authenticated_actor.id.clone(),
        OffsetDateTime::now_utc(),
    );
    let observation_id: ObservationId = persistence
        .add_observation(&observation)
        .map_err(translate_persistence_error)?;
    info!(observation_id = %observation_id, task_id = %task_id, "Added observation");

    let stored: Observation = persistence
        .get_observation(observation_id)
        .map_err(translate_persistence_error)?;
    observation_response(&stored)
}

/// Replaces an observation's text. The original author is kept.
///
/// # Errors
///
/// Returns an error if the observation does not exist, the actor may not
/// manage the task's sector, or the text is blank.
pub fn update_observation(
    persistence: &mut Persistence,
    observation_id: ObservationId,
    request: &ObservationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ObservationResponse, ApiError> {
    let mut observation: Observation = persistence
        .get_observation(observation_id)
        .map_err(translate_persistence_error)?;
    let sector: Sector = sector_of_task(persistence, observation.task_id)?;
    AuthorizationService::authorize_sector(authenticated_actor, sector, "UpdateObservation")?;
    validate_observation(&request.text, &authenticated_actor.id)
        .map_err(translate_domain_error)?;

    observation.edit(
        request.text.clone(),
        authenticated_actor.id.clone(),
        OffsetDateTime::now_utc(),
    );
    persistence
        .update_observation(&observation)
        .map_err(translate_persistence_error)?;
    info!(observation_id = %observation_id, "Updated observation");

    observation_response(&observation)
}

/// Deletes an observation. Deleting a missing observation reports
/// `deleted: false`.
///
/// # Errors
///
/// Returns an error if the actor may not manage the task's sector.
pub fn delete_observation(
    persistence: &mut Persistence,
    observation_id: ObservationId,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteObservationResponse, ApiError> {
    let observation: Observation = match persistence.get_observation(observation_id) {
        Ok(observation) => observation,
        Err(PersistenceError::NotFound(_)) => {
            debug!(observation_id = %observation_id, "Observation already absent");
            return Ok(DeleteObservationResponse {
                observation_id: observation_id.value(),
                deleted: false,
            });
        }
        Err(e) => return Err(translate_persistence_error(e)),
    };
    let sector: Sector = sector_of_task(persistence, observation.task_id)?;
    AuthorizationService::authorize_sector(authenticated_actor, sector, "DeleteObservation")?;

    let deleted: bool = persistence
        .delete_observation(observation_id)
        .map_err(translate_persistence_error)?;
    info!(observation_id = %observation_id, deleted, "Deleted observation");

    Ok(DeleteObservationResponse {
        observation_id: observation_id.value(),
        deleted,
    })
}

/// Lists a task's observations, oldest first.
///
/// # Errors
///
/// Returns an error if the task does not exist.
pub fn list_observations(
    persistence: &mut Persistence,
    task_id: TaskId,
) -> Result<Vec<ObservationResponse>, ApiError> {
    persistence
        .get_task_record_id(task_id)
        .map_err(translate_persistence_error)?;
    persistence
        .list_observations(task_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(observation_response)
        .collect()
}

// ============================================================================
// Employees and contracts
// ============================================================================

/// Registers an employee.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, the
/// registration is taken, or the contract does not exist.
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EmployeeResponse, ApiError> {
    AuthorizationService::authorize_manage_directory(authenticated_actor, "CreateEmployee")?;
    let activation: ActivationState = request.activation.parse().map_err(translate_domain_error)?;
    let employee = Employee::new(
        request.name.clone(),
        request.registration.clone(),
        activation,
        request.active_contract_id.map(ContractId::new),
    );
    validate_employee_fields(&employee).map_err(translate_domain_error)?;

    let employee_id: EmployeeId = persistence
        .create_employee(&employee)
        .map_err(translate_persistence_error)?;
    info!(employee_id = %employee_id, registration = %employee.registration, "Created employee");

    get_employee(persistence, employee_id)
}

/// Retrieves an employee.
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn get_employee(
    persistence: &mut Persistence,
    employee_id: EmployeeId,
) -> Result<EmployeeResponse, ApiError> {
    let employee: Employee = persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)?;
    employee_response(&employee)
}

/// Registers a contract.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the code is taken.
pub fn create_contract(
    persistence: &mut Persistence,
    request: &CreateContractRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ContractResponse, ApiError> {
    AuthorizationService::authorize_manage_directory(authenticated_actor, "CreateContract")?;
    let contract = Contract {
        contract_id: None,
        code: request.code.clone(),
        name: request.name.clone(),
    };
    validate_contract_fields(&contract).map_err(translate_domain_error)?;

    let contract_id: ContractId = persistence
        .create_contract(&contract)
        .map_err(translate_persistence_error)?;
    info!(contract_id = %contract_id, code = %contract.code, "Created contract");

    get_contract(persistence, contract_id)
}

/// Retrieves a contract.
///
/// # Errors
///
/// Returns an error if the contract does not exist.
pub fn get_contract(
    persistence: &mut Persistence,
    contract_id: ContractId,
) -> Result<ContractResponse, ApiError> {
    let contract: Contract = persistence
        .get_contract(contract_id)
        .map_err(translate_persistence_error)?;
    contract_response(&contract)
}

// ============================================================================
// Helpers
// ============================================================================

fn request_status_of(
    persistence: &mut Persistence,
    request_id: RequestId,
) -> Result<RequestStatus, ApiError> {
    let records: Vec<RelocationRecord> = persistence
        .list_records_for_request(request_id)
        .map_err(translate_persistence_error)?;
    Ok(rollup_request_status(records.iter().map(|r| &r.state)))
}

fn commit_transition(
    persistence: &mut Persistence,
    state: &RecordState,
    result: &TransitionResult,
    previous: RequestStatus,
) -> Result<TransitionResponse, ApiError> {
    let persisted = persistence
        .persist_transition(result, state.record.version)
        .map_err(translate_persistence_error)?;
    let fresh: RecordState = persistence
        .load_record_state(state.record_id)
        .map_err(translate_persistence_error)?;
    let current: RequestStatus = request_status_of(persistence, state.request_id())?;

    info!(
        record_id = %state.record_id,
        event_id = persisted.event_id,
        version = persisted.new_version,
        action = %result.audit_event.action.name,
        state = %fresh.workflow(),
        "Applied transition"
    );

    Ok(TransitionResponse {
        event_id: persisted.event_id,
        action: result.audit_event.action.name.clone(),
        previous_request_status: previous.to_string(),
        request_status: current.to_string(),
        created_task_ids: persisted.created_tasks.iter().map(TaskId::value).collect(),
        record: record_response(&fresh)?,
    })
}

/// Loads the record, builds the task command from it and commits the result,
/// re-evaluating on concurrent modification.
fn run_task_command<F>(
    persistence: &mut Persistence,
    record_id: RecordId,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
    mut build: F,
) -> Result<TransitionResponse, ApiError>
where
    F: FnMut(&RecordState) -> Result<TaskCommand, ApiError>,
{
    retry_on_conflict(max_retries, || {
        let state: RecordState = persistence
            .load_record_state(record_id)
            .map_err(translate_persistence_error)?;
        let command: TaskCommand = build(&state)?;
        let previous: RequestStatus = request_status_of(persistence, state.request_id())?;
        let result: TransitionResult = apply_task(
            &state,
            command,
            authenticated_actor.to_audit_actor(),
            cause.clone(),
            OffsetDateTime::now_utc(),
        )
        .map_err(translate_core_error)?;
        commit_transition(persistence, &state, &result, previous)
    })
}

/// Runs a command on an existing task, authorizing against the task's sector.
fn run_task_scoped(
    persistence: &mut Persistence,
    task_id: TaskId,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
    max_retries: u32,
    command: TaskCommand,
) -> Result<TransitionResponse, ApiError> {
    let record_id: RecordId = persistence
        .get_task_record_id(task_id)
        .map_err(translate_persistence_error)?;
    let action: &'static str = command.name();
    run_task_command(
        persistence,
        record_id,
        authenticated_actor,
        cause,
        max_retries,
        |state| {
            let sector: Sector = sector_in(state, task_id)?;
            AuthorizationService::authorize_sector(authenticated_actor, sector, action)?;
            Ok(command.clone())
        },
    )
}

fn sector_in(state: &RecordState, task_id: TaskId) -> Result<Sector, ApiError> {
    state
        .tasks
        .iter()
        .find(|task| task.task_id == Some(task_id))
        .map(|task| task.sector)
        .ok_or_else(|| translate_domain_error(DomainError::TaskNotFound(task_id)))
}

fn sector_of_task(persistence: &mut Persistence, task_id: TaskId) -> Result<Sector, ApiError> {
    let record_id: RecordId = persistence
        .get_task_record_id(task_id)
        .map_err(translate_persistence_error)?;
    let state: RecordState = persistence
        .load_record_state(record_id)
        .map_err(translate_persistence_error)?;
    sector_in(&state, task_id)
}

fn parse_sectors(values: &[String]) -> Result<Vec<Sector>, ApiError> {
    values
        .iter()
        .map(|value| value.parse().map_err(translate_domain_error))
        .collect()
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(parse_date)
        .transpose()
        .map_err(translate_domain_error)
}
