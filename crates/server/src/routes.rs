// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP endpoints.
//!
//! The caller identifies itself with the `x-actor-id` and `x-actor-role`
//! headers; `x-request-id` becomes the audit cause. Each endpoint delegates
//! to one API handler and publishes live events for committed changes.

use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use reloc::Command;
use reloc_api::{
    ApiError, ApproveRequestRequest, AuditEventResponse, AuthenticatedActor, CancelRecordRequest,
    ContractResponse, CreateContractRequest, CreateEmployeeRequest, CreateTaskRequest,
    DeleteObservationResponse, DocumentObservationRequest, EmployeeResponse,
    GenerateStandardTasksRequest, ObservationRequest, ObservationResponse, OpenRequestRequest,
    OpenRequestResponse, RecordResponse, RequestResponse, Role, TaskDateRequest,
    TransitionResponse, TransitionTaskRequest, authenticate_stub,
};
use reloc_audit::Cause;
use reloc_domain::{ContractId, EmployeeId, ObservationId, RecordId, RequestId, TaskId};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;
use crate::live::LiveEvent;

/// Header carrying the caller's identifier.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
/// Header carrying the caller's role.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
/// Header carrying the request identifier recorded as the audit cause.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::GuardNotSatisfied { .. }
            | ApiError::TerminalState { .. }
            | ApiError::ConcurrentModification { .. }
            | ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidState { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

type HttpResult<T> = Result<Json<T>, HttpError>;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Authenticates the caller from the request headers.
fn authenticate(
    headers: &HeaderMap,
    description: &str,
) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let role: Role = Role::parse(header(headers, ACTOR_ROLE_HEADER).unwrap_or_default())
        .map_err(ApiError::from)?;
    let actor_id: String = String::from(header(headers, ACTOR_ID_HEADER).unwrap_or_default());
    let actor: AuthenticatedActor = authenticate_stub(actor_id, role).map_err(ApiError::from)?;
    let cause: Cause = Cause::new(
        String::from(header(headers, REQUEST_ID_HEADER).unwrap_or("unspecified")),
        String::from(description),
    );
    Ok((actor, cause))
}

fn publish_record_result(
    app_state: &AppState,
    record_id: i64,
    action: &str,
    result: Result<TransitionResponse, ApiError>,
) -> HttpResult<TransitionResponse> {
    match result {
        Ok(response) => {
            app_state
                .live
                .broadcast_all(&LiveEvent::for_transition(&response));
            Ok(Json(response))
        }
        Err(err) => {
            if let Some(event) = LiveEvent::for_rejection(record_id, action, &err) {
                app_state.live.broadcast(&event);
            }
            Err(err.into())
        }
    }
}

fn publish_task_result(
    app_state: &AppState,
    result: Result<TransitionResponse, ApiError>,
) -> HttpResult<TransitionResponse> {
    let response: TransitionResponse = result?;
    app_state
        .live
        .broadcast_all(&LiveEvent::for_task_change(&response));
    Ok(Json(response))
}

async fn run_record_command(
    app_state: &AppState,
    headers: &HeaderMap,
    record_id: i64,
    command: Command,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(headers, command.name())?;
    info!(actor_id = %actor.id, record_id, action = command.name(), "Handling record command");

    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::apply_record_command(
            &mut persistence,
            RecordId::new(record_id),
            &command,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_record_result(app_state, record_id, command.name(), result)
}

// ============================================================================
// Requests and records
// ============================================================================

/// Handler for POST `/requests`.
pub async fn handle_open_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<OpenRequestRequest>,
) -> HttpResult<OpenRequestResponse> {
    let (actor, cause) = authenticate(&headers, "Open relocation request")?;
    info!(actor_id = %actor.id, request_type = %req.request_type, "Handling open request");

    let mut persistence = app_state.persistence.lock().await;
    let response = reloc_api::open_request(&mut persistence, &req, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for GET `/requests/{request_id}`.
pub async fn handle_get_request(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<i64>,
) -> HttpResult<RequestResponse> {
    authenticate(&headers, "Read request")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::get_request(
        &mut persistence,
        RequestId::new(request_id),
    )?))
}

/// Handler for GET `/records/{record_id}`.
pub async fn handle_get_record(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
) -> HttpResult<RecordResponse> {
    authenticate(&headers, "Read record")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::get_record(
        &mut persistence,
        RecordId::new(record_id),
    )?))
}

/// Handler for POST `/records/{record_id}/approve`.
pub async fn handle_approve(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
    body: Option<Json<ApproveRequestRequest>>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "ApproveRequest")?;
    let Json(req) = body.unwrap_or_default();

    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::approve_request(
            &mut persistence,
            RecordId::new(record_id),
            &req,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_record_result(&app_state, record_id, "ApproveRequest", result)
}

/// Handler for POST `/records/{record_id}/reject`.
pub async fn handle_reject(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
) -> HttpResult<TransitionResponse> {
    run_record_command(&app_state, &headers, record_id, Command::RejectRequest).await
}

/// Handler for POST `/records/{record_id}/draft`.
pub async fn handle_create_draft(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
) -> HttpResult<TransitionResponse> {
    run_record_command(&app_state, &headers, record_id, Command::CreateDraft).await
}

/// Handler for POST `/records/{record_id}/submit`.
pub async fn handle_submit(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
    body: Option<Json<DocumentObservationRequest>>,
) -> HttpResult<TransitionResponse> {
    let Json(req) = body.unwrap_or_default();
    let command = Command::SubmitDraft {
        observation: req.observation,
    };
    run_record_command(&app_state, &headers, record_id, command).await
}

/// Handler for POST `/records/{record_id}/begin_validation`.
pub async fn handle_begin_validation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
) -> HttpResult<TransitionResponse> {
    run_record_command(&app_state, &headers, record_id, Command::BeginValidation).await
}

/// Handler for POST `/records/{record_id}/validate`.
pub async fn handle_validate(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
) -> HttpResult<TransitionResponse> {
    run_record_command(&app_state, &headers, record_id, Command::ValidateDocument).await
}

/// Handler for POST `/records/{record_id}/invalidate`.
pub async fn handle_invalidate(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
    body: Option<Json<DocumentObservationRequest>>,
) -> HttpResult<TransitionResponse> {
    let Json(req) = body.unwrap_or_default();
    let command = Command::InvalidateDocument {
        observation: req.observation,
    };
    run_record_command(&app_state, &headers, record_id, command).await
}

/// Handler for POST `/records/{record_id}/cancel`.
pub async fn handle_cancel(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
    body: Option<Json<CancelRecordRequest>>,
) -> HttpResult<TransitionResponse> {
    let Json(req) = body.unwrap_or_default();
    let command = Command::CancelRecord { reason: req.reason };
    run_record_command(&app_state, &headers, record_id, command).await
}

/// Handler for GET `/records/{record_id}/audit`.
pub async fn handle_get_record_audit(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
) -> HttpResult<Vec<AuditEventResponse>> {
    authenticate(&headers, "Read audit timeline")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::get_record_audit(
        &mut persistence,
        RecordId::new(record_id),
    )?))
}

// ============================================================================
// Tasks
// ============================================================================

/// Handler for POST `/records/{record_id}/tasks`.
pub async fn handle_create_task(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "CreateTask")?;
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::create_task(
            &mut persistence,
            RecordId::new(record_id),
            &req,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_task_result(&app_state, result)
}

/// Handler for POST `/records/{record_id}/tasks/standard`.
pub async fn handle_generate_standard_tasks(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(record_id): Path<i64>,
    Json(req): Json<GenerateStandardTasksRequest>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "GenerateStandardTasks")?;
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::generate_standard_tasks(
            &mut persistence,
            RecordId::new(record_id),
            &req,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_task_result(&app_state, result)
}

/// Handler for POST `/tasks/{task_id}/transition`.
pub async fn handle_transition_task(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<i64>,
    Json(req): Json<TransitionTaskRequest>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "TransitionTask")?;
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::transition_task(
            &mut persistence,
            TaskId::new(task_id),
            &req,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_task_result(&app_state, result)
}

/// Handler for POST `/tasks/{task_id}/due_date`.
pub async fn handle_set_due_date(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<i64>,
    Json(req): Json<TaskDateRequest>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "SetTaskDueDate")?;
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::set_task_due_date(
            &mut persistence,
            TaskId::new(task_id),
            &req,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_task_result(&app_state, result)
}

/// Handler for POST `/tasks/{task_id}/extension`.
pub async fn handle_extend_due_date(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<i64>,
    Json(req): Json<TaskDateRequest>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "ExtendTaskDueDate")?;
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::extend_task_due_date(
            &mut persistence,
            TaskId::new(task_id),
            &req,
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_task_result(&app_state, result)
}

/// Handler for DELETE `/tasks/{task_id}`.
pub async fn handle_delete_task(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<i64>,
) -> HttpResult<TransitionResponse> {
    let (actor, cause) = authenticate(&headers, "DeleteTask")?;
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        reloc_api::delete_task(
            &mut persistence,
            TaskId::new(task_id),
            &actor,
            &cause,
            app_state.max_conflict_retries,
        )
    };
    publish_task_result(&app_state, result)
}

// ============================================================================
// Observations
// ============================================================================

/// Handler for GET `/tasks/{task_id}/observations`.
pub async fn handle_list_observations(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<i64>,
) -> HttpResult<Vec<ObservationResponse>> {
    authenticate(&headers, "Read observations")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::list_observations(
        &mut persistence,
        TaskId::new(task_id),
    )?))
}

/// Handler for POST `/tasks/{task_id}/observations`.
pub async fn handle_add_observation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(task_id): Path<i64>,
    Json(req): Json<ObservationRequest>,
) -> HttpResult<ObservationResponse> {
    let (actor, _) = authenticate(&headers, "AddObservation")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::add_observation(
        &mut persistence,
        TaskId::new(task_id),
        &req,
        &actor,
    )?))
}

/// Handler for PUT `/observations/{observation_id}`.
pub async fn handle_update_observation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(observation_id): Path<i64>,
    Json(req): Json<ObservationRequest>,
) -> HttpResult<ObservationResponse> {
    let (actor, _) = authenticate(&headers, "UpdateObservation")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::update_observation(
        &mut persistence,
        ObservationId::new(observation_id),
        &req,
        &actor,
    )?))
}

/// Handler for DELETE `/observations/{observation_id}`.
pub async fn handle_delete_observation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(observation_id): Path<i64>,
) -> HttpResult<DeleteObservationResponse> {
    let (actor, _) = authenticate(&headers, "DeleteObservation")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::delete_observation(
        &mut persistence,
        ObservationId::new(observation_id),
        &actor,
    )?))
}

// ============================================================================
// Employees and contracts
// ============================================================================

/// Handler for POST `/employees`.
pub async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateEmployeeRequest>,
) -> HttpResult<EmployeeResponse> {
    let (actor, _) = authenticate(&headers, "CreateEmployee")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::create_employee(
        &mut persistence,
        &req,
        &actor,
    )?))
}

/// Handler for GET `/employees/{employee_id}`.
pub async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<i64>,
) -> HttpResult<EmployeeResponse> {
    authenticate(&headers, "Read employee")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::get_employee(
        &mut persistence,
        EmployeeId::new(employee_id),
    )?))
}

/// Handler for POST `/contracts`.
pub async fn handle_create_contract(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateContractRequest>,
) -> HttpResult<ContractResponse> {
    let (actor, _) = authenticate(&headers, "CreateContract")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::create_contract(
        &mut persistence,
        &req,
        &actor,
    )?))
}

/// Handler for GET `/contracts/{contract_id}`.
pub async fn handle_get_contract(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(contract_id): Path<i64>,
) -> HttpResult<ContractResponse> {
    authenticate(&headers, "Read contract")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reloc_api::get_contract(
        &mut persistence,
        ContractId::new(contract_id),
    )?))
}
