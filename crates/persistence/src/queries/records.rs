// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Relocation record and task queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc::RecordState;
use reloc_domain::{RecordId, RelocationRecord, RequestId, RequestType, Task, TaskId};

use crate::data_models::{RecordRow, TaskRow};
use crate::diesel_schema::{relocation_records, relocation_requests, tasks};
use crate::error::PersistenceError;

/// Retrieves a relocation record by ID.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist, or a reconstruction
/// error if its stored axes form an impossible combination.
pub fn get_record(
    conn: &mut SqliteConnection,
    record_id: RecordId,
) -> Result<RelocationRecord, PersistenceError> {
    relocation_records::table
        .filter(relocation_records::record_id.eq(record_id.value()))
        .select(RecordRow::as_select())
        .first::<RecordRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Record {record_id}")))?
        .try_into()
}

/// Lists the records of a request, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_records_for_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<Vec<RelocationRecord>, PersistenceError> {
    relocation_records::table
        .filter(relocation_records::request_id.eq(request_id.value()))
        .select(RecordRow::as_select())
        .order(relocation_records::record_id.asc())
        .load::<RecordRow>(conn)?
        .into_iter()
        .map(RelocationRecord::try_from)
        .collect()
}

/// Lists the tasks of a record in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_tasks_for_record(
    conn: &mut SqliteConnection,
    record_id: RecordId,
) -> Result<Vec<Task>, PersistenceError> {
    tasks::table
        .filter(tasks::record_id.eq(record_id.value()))
        .select(TaskRow::as_select())
        .order(tasks::task_id.asc())
        .load::<TaskRow>(conn)?
        .into_iter()
        .map(Task::try_from)
        .collect()
}

/// Returns the record owning a task.
///
/// # Errors
///
/// Returns `NotFound` if the task does not exist.
pub fn get_task_record_id(
    conn: &mut SqliteConnection,
    task_id: TaskId,
) -> Result<RecordId, PersistenceError> {
    tasks::table
        .filter(tasks::task_id.eq(task_id.value()))
        .select(tasks::record_id)
        .first::<i64>(conn)
        .optional()?
        .map(RecordId::new)
        .ok_or_else(|| PersistenceError::NotFound(format!("Task {task_id}")))
}

/// Loads everything the engine needs to evaluate a command on one record.
///
/// # Errors
///
/// Returns `NotFound` if the record does not exist.
pub fn load_record_state(
    conn: &mut SqliteConnection,
    record_id: RecordId,
) -> Result<RecordState, PersistenceError> {
    let record: RelocationRecord = get_record(conn, record_id)?;
    let request_type: String = relocation_requests::table
        .filter(relocation_requests::request_id.eq(record.request_id.value()))
        .select(relocation_requests::request_type)
        .first::<String>(conn)?;
    let request_type: RequestType = request_type.parse()?;
    let tasks: Vec<Task> = list_tasks_for_record(conn, record_id)?;

    Ok(RecordState::new(record_id, request_type, record, tasks))
}
