// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee, contract and request lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc_domain::{
    Contract, ContractId, Employee, EmployeeId, RecordId, RelocationRequest, RequestId,
    TaskGroupStatus,
};

use crate::data_models::{ContractRow, EmployeeRow, RequestRow};
use crate::diesel_schema::{contracts, employees, relocation_records, relocation_requests};
use crate::error::PersistenceError;

/// Task-group values of records that no longer count as open.
pub const CLOSED_TASK_GROUPS: [&str; 3] = [
    TaskGroupStatus::RequestCompleted.as_str(),
    TaskGroupStatus::RequestRejected.as_str(),
    TaskGroupStatus::Cancelled.as_str(),
];

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: EmployeeId,
) -> Result<Employee, PersistenceError> {
    employees::table
        .filter(employees::employee_id.eq(employee_id.value()))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Employee {employee_id}")))?
        .try_into()
}

/// Retrieves a contract by ID.
///
/// # Errors
///
/// Returns `NotFound` if the contract does not exist.
pub fn get_contract(
    conn: &mut SqliteConnection,
    contract_id: ContractId,
) -> Result<Contract, PersistenceError> {
    contracts::table
        .filter(contracts::contract_id.eq(contract_id.value()))
        .select(ContractRow::as_select())
        .first::<ContractRow>(conn)
        .optional()?
        .map(Contract::from)
        .ok_or_else(|| PersistenceError::NotFound(format!("Contract {contract_id}")))
}

/// Retrieves a relocation request by ID.
///
/// # Errors
///
/// Returns `NotFound` if the request does not exist.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<RelocationRequest, PersistenceError> {
    relocation_requests::table
        .filter(relocation_requests::request_id.eq(request_id.value()))
        .select(RequestRow::as_select())
        .first::<RequestRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Request {request_id}")))?
        .try_into()
}

/// Lists the open (non-terminal) records held by any of the given employees.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_open_records_for(
    conn: &mut SqliteConnection,
    employee_ids: &[EmployeeId],
) -> Result<Vec<(EmployeeId, RecordId)>, PersistenceError> {
    let ids: Vec<i64> = employee_ids.iter().map(EmployeeId::value).collect();
    let rows: Vec<(i64, i64)> = relocation_records::table
        .filter(relocation_records::employee_id.eq_any(ids))
        .filter(relocation_records::task_group.ne_all(CLOSED_TASK_GROUPS))
        .select((relocation_records::employee_id, relocation_records::record_id))
        .order(relocation_records::record_id.asc())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(employee_id, record_id)| (EmployeeId::new(employee_id), RecordId::new(record_id)))
        .collect())
}
