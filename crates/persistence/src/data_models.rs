// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Enumerations are stored as their canonical upper-case strings, dates as
//! `YYYY-MM-DD` and timestamps as RFC 3339.

use diesel::prelude::*;
use reloc_domain::{
    ActivationState, Contract, ContractId, Employee, EmployeeId, Observation, ObservationId,
    Priority, RecordId, RelocationRecord, RelocationRequest, RequestId, RequestType, Sector,
    Task, TaskId, TaskStatus, WorkflowState, format_date, parse_date,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{
    contracts, employees, relocation_records, relocation_requests, task_observations, tasks,
};
use crate::error::PersistenceError;

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(value.format(&Rfc3339)?)
}

pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(value, &Rfc3339)?)
}

fn format_optional_date(value: Option<time::Date>) -> Result<Option<String>, PersistenceError> {
    value.map(format_date).transpose().map_err(Into::into)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<time::Date>, PersistenceError> {
    value.map(parse_date).transpose().map_err(Into::into)
}

// ============================================================================
// Contracts
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = contracts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContractRow {
    pub contract_id: i64,
    pub code: String,
    pub name: String,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Self {
            contract_id: Some(ContractId::new(row.contract_id)),
            code: row.code,
            name: row.name,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = contracts)]
pub struct NewContractRow<'a> {
    pub code: &'a str,
    pub name: &'a str,
}

// ============================================================================
// Employees
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub registration: String,
    pub activation: String,
    pub in_migration: i32,
    pub active_contract_id: Option<i64>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: Some(EmployeeId::new(row.employee_id)),
            name: row.name,
            registration: row.registration,
            activation: row.activation.parse::<ActivationState>()?,
            in_migration: row.in_migration != 0,
            active_contract: row.active_contract_id.map(ContractId::new),
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub name: &'a str,
    pub registration: &'a str,
    pub activation: &'static str,
    pub in_migration: i32,
    pub active_contract_id: Option<i64>,
}

impl<'a> NewEmployeeRow<'a> {
    pub fn from_employee(employee: &'a Employee) -> Self {
        Self {
            name: &employee.name,
            registration: &employee.registration,
            activation: employee.activation.as_str(),
            in_migration: i32::from(employee.in_migration),
            active_contract_id: employee.active_contract.map(|id| id.value()),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = relocation_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RequestRow {
    pub request_id: i64,
    pub request_type: String,
    pub origin_contract_id: Option<i64>,
    pub destination_contract_id: Option<i64>,
    pub requested_by: String,
    pub justification: String,
    pub requested_on: String,
    pub requires_approval: i32,
}

impl TryFrom<RequestRow> for RelocationRequest {
    type Error = PersistenceError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            request_id: Some(RequestId::new(row.request_id)),
            request_type: row.request_type.parse::<RequestType>()?,
            origin_contract: row.origin_contract_id.map(ContractId::new),
            destination_contract: row.destination_contract_id.map(ContractId::new),
            requested_by: row.requested_by,
            justification: row.justification,
            requested_on: parse_date(&row.requested_on)?,
            requires_approval: row.requires_approval != 0,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = relocation_requests)]
pub struct NewRequestRow<'a> {
    pub request_type: &'static str,
    pub origin_contract_id: Option<i64>,
    pub destination_contract_id: Option<i64>,
    pub requested_by: &'a str,
    pub justification: &'a str,
    pub requested_on: String,
    pub requires_approval: i32,
}

impl<'a> NewRequestRow<'a> {
    pub fn from_request(request: &'a RelocationRequest) -> Result<Self, PersistenceError> {
        Ok(Self {
            request_type: request.request_type.as_str(),
            origin_contract_id: request.origin_contract.map(|id| id.value()),
            destination_contract_id: request.destination_contract.map(|id| id.value()),
            requested_by: &request.requested_by,
            justification: &request.justification,
            requested_on: format_date(request.requested_on)?,
            requires_approval: i32::from(request.requires_approval),
        })
    }
}

// ============================================================================
// Records
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = relocation_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecordRow {
    pub record_id: i64,
    pub request_id: i64,
    pub employee_id: i64,
    pub task_group: String,
    pub document: String,
    pub document_observation: Option<String>,
    pub version: i64,
    pub updated_at: String,
}

impl TryFrom<RecordRow> for RelocationRecord {
    type Error = PersistenceError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let state: WorkflowState =
            WorkflowState::from_axes(row.task_group.parse()?, row.document.parse()?)?;
        Ok(Self {
            record_id: Some(RecordId::new(row.record_id)),
            request_id: RequestId::new(row.request_id),
            employee_id: EmployeeId::new(row.employee_id),
            state,
            document_observation: row.document_observation,
            version: row.version,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = relocation_records)]
pub struct NewRecordRow {
    pub request_id: i64,
    pub employee_id: i64,
    pub task_group: &'static str,
    pub document: &'static str,
    pub version: i64,
    pub updated_at: String,
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    pub task_id: i64,
    pub record_id: i64,
    pub task_type: String,
    pub description: String,
    pub sector: String,
    pub priority: String,
    pub status: String,
    pub due_date: Option<String>,
    pub due_date_extension: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = PersistenceError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            task_id: Some(TaskId::new(row.task_id)),
            record_id: RecordId::new(row.record_id),
            task_type: row.task_type,
            description: row.description,
            sector: row.sector.parse::<Sector>()?,
            priority: row.priority.parse::<Priority>()?,
            status: row.status.parse::<TaskStatus>()?,
            due_date: parse_optional_date(row.due_date.as_deref())?,
            due_date_extension: parse_optional_date(row.due_date_extension.as_deref())?,
            completed_at: row
                .completed_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Column values shared by task inserts and updates.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset<'a> {
    pub record_id: i64,
    pub task_type: &'a str,
    pub description: &'a str,
    pub sector: &'static str,
    pub priority: &'static str,
    pub status: &'static str,
    pub due_date: Option<String>,
    pub due_date_extension: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
}

impl<'a> TaskChangeset<'a> {
    pub fn from_task(task: &'a Task) -> Result<Self, PersistenceError> {
        Ok(Self {
            record_id: task.record_id.value(),
            task_type: &task.task_type,
            description: &task.description,
            sector: task.sector.as_str(),
            priority: task.priority.as_str(),
            status: task.status.as_str(),
            due_date: format_optional_date(task.due_date)?,
            due_date_extension: format_optional_date(task.due_date_extension)?,
            completed_at: task.completed_at.map(format_timestamp).transpose()?,
            created_at: format_timestamp(task.created_at)?,
        })
    }
}

// ============================================================================
// Observations
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = task_observations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ObservationRow {
    pub observation_id: i64,
    pub task_id: i64,
    pub text: String,
    pub author: String,
    pub created_at: String,
    pub modified_by: Option<String>,
    pub modified_at: Option<String>,
}

impl TryFrom<ObservationRow> for Observation {
    type Error = PersistenceError;

    fn try_from(row: ObservationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            observation_id: Some(ObservationId::new(row.observation_id)),
            task_id: TaskId::new(row.task_id),
            text: row.text,
            author: row.author,
            created_at: parse_timestamp(&row.created_at)?,
            modified_by: row.modified_by,
            modified_at: row.modified_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = task_observations)]
pub struct NewObservationRow<'a> {
    pub task_id: i64,
    pub text: &'a str,
    pub author: &'a str,
    pub created_at: String,
}
