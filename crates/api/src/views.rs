// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Projections from domain values onto response DTOs.

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    AuditEventResponse, ContractResponse, EmployeeResponse, ObservationResponse, RecordResponse,
    RecordSummary, SectorProgressInfo, TaskInfo,
};
use reloc::RecordState;
use reloc_audit::AuditEvent;
use reloc_domain::{
    Contract, Employee, Observation, RelocationRecord, Task, format_date, sector_progress,
};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn format_optional_timestamp(
    timestamp: Option<OffsetDateTime>,
) -> Result<Option<String>, ApiError> {
    timestamp.map(format_timestamp).transpose()
}

fn format_optional_date(date: Option<Date>) -> Result<Option<String>, ApiError> {
    date.map(format_date)
        .transpose()
        .map_err(translate_domain_error)
}

/// Stored values always carry an identifier.
fn require_id<T>(id: Option<T>, what: &str) -> Result<T, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: format!("{what} has no identifier"),
    })
}

pub fn task_info(task: &Task) -> Result<TaskInfo, ApiError> {
    Ok(TaskInfo {
        task_id: require_id(task.task_id, "Task")?.value(),
        task_type: task.task_type.clone(),
        description: task.description.clone(),
        sector: task.sector.to_string(),
        priority: task.priority.to_string(),
        status: task.status.to_string(),
        due_date: format_optional_date(task.due_date)?,
        due_date_extension: format_optional_date(task.due_date_extension)?,
        completed_at: format_optional_timestamp(task.completed_at)?,
        created_at: format_timestamp(task.created_at)?,
    })
}

pub fn record_response(state: &RecordState) -> Result<RecordResponse, ApiError> {
    let workflow = state.workflow();
    let tasks: Vec<TaskInfo> = state
        .tasks
        .iter()
        .map(task_info)
        .collect::<Result<_, _>>()?;
    let progress: Vec<SectorProgressInfo> = sector_progress(&state.tasks)
        .into_iter()
        .map(|p| SectorProgressInfo {
            sector: p.sector.to_string(),
            total: p.total,
            done: p.done,
            percent: p.percent,
        })
        .collect();

    Ok(RecordResponse {
        record_id: state.record_id.value(),
        request_id: state.request_id().value(),
        employee_id: state.employee_id().value(),
        task_group: workflow.task_group().to_string(),
        document: workflow.document().to_string(),
        document_observation: state.record.document_observation.clone(),
        responsible_actor: workflow.responsible_actor().to_string(),
        document_targets: workflow
            .document_targets()
            .iter()
            .map(ToString::to_string)
            .collect(),
        version: state.record.version,
        updated_at: format_timestamp(state.record.updated_at)?,
        tasks,
        progress,
    })
}

pub fn record_summary(record: &RelocationRecord) -> Result<RecordSummary, ApiError> {
    Ok(RecordSummary {
        record_id: require_id(record.record_id, "Record")?.value(),
        employee_id: record.employee_id.value(),
        task_group: record.state.task_group().to_string(),
        document: record.state.document().to_string(),
        version: record.version,
    })
}

pub fn observation_response(observation: &Observation) -> Result<ObservationResponse, ApiError> {
    Ok(ObservationResponse {
        observation_id: require_id(observation.observation_id, "Observation")?.value(),
        task_id: observation.task_id.value(),
        text: observation.text.clone(),
        author: observation.author.clone(),
        created_at: format_timestamp(observation.created_at)?,
        modified_by: observation.modified_by.clone(),
        modified_at: format_optional_timestamp(observation.modified_at)?,
    })
}

pub fn audit_event_response(event: &AuditEvent) -> Result<AuditEventResponse, ApiError> {
    Ok(AuditEventResponse {
        event_id: require_id(event.event_id, "Audit event")?,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
    })
}

pub fn employee_response(employee: &Employee) -> Result<EmployeeResponse, ApiError> {
    Ok(EmployeeResponse {
        employee_id: require_id(employee.employee_id, "Employee")?.value(),
        name: employee.name.clone(),
        registration: employee.registration.clone(),
        activation: employee.activation.to_string(),
        in_migration: employee.in_migration,
        active_contract_id: employee.active_contract.map(|c| c.value()),
    })
}

pub fn contract_response(contract: &Contract) -> Result<ContractResponse, ApiError> {
    Ok(ContractResponse {
        contract_id: require_id(contract.contract_id, "Contract")?.value(),
        code: contract.code.clone(),
        name: contract.name.clone(),
    })
}
