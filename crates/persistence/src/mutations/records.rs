// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request opening and transition persistence.
//!
//! Both functions write several tables and must run inside one transaction
//! owned by the caller; see `Persistence::persist_transition`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc::{OpenRequestResult, TransitionResult, apply_effects};
use reloc_domain::{RecordId, RequestId, TaskId, WorkflowAxes};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewRecordRow, NewRequestRow, TaskChangeset, format_timestamp};
use crate::diesel_schema::{relocation_records, relocation_requests, tasks};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::directory::SqliteDirectory;
use crate::queries::canonical::list_open_records_for;

/// Identifiers assigned when a request is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedRequest {
    /// The new request.
    pub request_id: RequestId,
    /// One record per employee, in the order the employees were given.
    pub record_ids: Vec<RecordId>,
    /// The `OpenRequest` audit event.
    pub event_id: i64,
}

/// The outcome of persisting a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The audit event ID.
    pub event_id: i64,
    /// The record version after the write.
    pub new_version: i64,
    /// IDs assigned to the tasks the transition created, in task order.
    pub created_tasks: Vec<TaskId>,
}

/// Persists a newly opened request, its records and the in-migration marks.
///
/// The open-record check is repeated here so that two requests racing for
/// the same employee cannot both succeed.
///
/// # Errors
///
/// Returns `EmployeeAlreadyInRelocation` if any employee gained an open
/// record since the request was validated, or an error if a write fails.
pub fn persist_open_request(
    conn: &mut SqliteConnection,
    result: &OpenRequestResult,
    now: OffsetDateTime,
) -> Result<OpenedRequest, PersistenceError> {
    if let Some((employee_id, record_id)) = list_open_records_for(conn, &result.employees)?
        .into_iter()
        .next()
    {
        return Err(PersistenceError::EmployeeAlreadyInRelocation {
            employee_id,
            record_id,
        });
    }

    diesel::insert_into(relocation_requests::table)
        .values(NewRequestRow::from_request(&result.request)?)
        .execute(conn)?;
    let request_id: RequestId = RequestId::new(get_last_insert_rowid(conn)?);

    let axes: WorkflowAxes = result.initial_state.axes();
    let updated_at: String = format_timestamp(now)?;
    let mut record_ids: Vec<RecordId> = Vec::with_capacity(result.employees.len());
    for employee_id in &result.employees {
        diesel::insert_into(relocation_records::table)
            .values(NewRecordRow {
                request_id: request_id.value(),
                employee_id: employee_id.value(),
                task_group: axes.task_group.as_str(),
                document: axes.document.as_str(),
                version: 0,
                updated_at: updated_at.clone(),
            })
            .execute(conn)?;
        record_ids.push(RecordId::new(get_last_insert_rowid(conn)?));
    }

    apply_effects(&mut SqliteDirectory::new(conn), &result.effects)?;
    let event_id: i64 = persist_audit_event(conn, &result.audit_event, Some(request_id), None)?;

    info!(
        request_id = request_id.value(),
        records = record_ids.len(),
        event_id,
        "Opened relocation request"
    );

    Ok(OpenedRequest {
        request_id,
        record_ids,
        event_id,
    })
}

/// Persists a transition: record state with version check, task changes,
/// employee effects and the audit event.
///
/// # Errors
///
/// Returns `ConcurrentModification` if the stored version is no longer
/// `expected_version`. Any error leaves the caller's transaction to roll
/// back every write made here.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
    expected_version: i64,
) -> Result<PersistTransitionResult, PersistenceError> {
    let state = &result.new_state;
    let record_id: RecordId = state.record_id;
    let axes: WorkflowAxes = state.workflow().axes();

    let affected: usize = diesel::update(
        relocation_records::table
            .filter(relocation_records::record_id.eq(record_id.value()))
            .filter(relocation_records::version.eq(expected_version)),
    )
    .set((
        relocation_records::task_group.eq(axes.task_group.as_str()),
        relocation_records::document.eq(axes.document.as_str()),
        relocation_records::document_observation.eq(state.record.document_observation.as_deref()),
        relocation_records::version.eq(relocation_records::version + 1),
        relocation_records::updated_at.eq(format_timestamp(state.record.updated_at)?),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ConcurrentModification {
            record_id,
            expected_version,
        });
    }

    for task_id in &result.deleted_tasks {
        diesel::delete(
            tasks::table
                .filter(tasks::task_id.eq(task_id.value()))
                .filter(tasks::record_id.eq(record_id.value())),
        )
        .execute(conn)?;
        debug!(task_id = task_id.value(), "Deleted task");
    }

    let mut created_tasks: Vec<TaskId> = Vec::new();
    for task in &state.tasks {
        let changes: TaskChangeset<'_> = TaskChangeset::from_task(task)?;
        if let Some(task_id) = task.task_id {
            diesel::update(tasks::table.filter(tasks::task_id.eq(task_id.value())))
                .set(&changes)
                .execute(conn)?;
        } else {
            diesel::insert_into(tasks::table)
                .values(&changes)
                .execute(conn)?;
            created_tasks.push(TaskId::new(get_last_insert_rowid(conn)?));
        }
    }

    apply_effects(&mut SqliteDirectory::new(conn), &result.effects)?;
    let event_id: i64 = persist_audit_event(conn, &result.audit_event, None, None)?;

    info!(
        record_id = record_id.value(),
        event_id,
        action = %result.audit_event.action.name,
        state = %state.workflow(),
        "Persisted transition"
    );

    Ok(PersistTransitionResult {
        event_id,
        new_version: expected_version + 1,
        created_tasks,
    })
}
