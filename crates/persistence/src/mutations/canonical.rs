// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and contract writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc_domain::{Contract, ContractId, Employee, EmployeeId};
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewContractRow, NewEmployeeRow};
use crate::diesel_schema::{contracts, employees};
use crate::error::PersistenceError;

/// Inserts a contract and returns its new ID.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the code is already taken.
pub fn create_contract(
    conn: &mut SqliteConnection,
    contract: &Contract,
) -> Result<ContractId, PersistenceError> {
    diesel::insert_into(contracts::table)
        .values(NewContractRow {
            code: &contract.code,
            name: &contract.name,
        })
        .execute(conn)?;

    let contract_id: ContractId = ContractId::new(get_last_insert_rowid(conn)?);
    info!(contract_id = contract_id.value(), code = %contract.code, "Created contract");
    Ok(contract_id)
}

/// Inserts an employee and returns the new ID.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the registration is already taken or
/// the active contract does not exist.
pub fn create_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<EmployeeId, PersistenceError> {
    diesel::insert_into(employees::table)
        .values(NewEmployeeRow::from_employee(employee))
        .execute(conn)?;

    let employee_id: EmployeeId = EmployeeId::new(get_last_insert_rowid(conn)?);
    info!(
        employee_id = employee_id.value(),
        registration = %employee.registration,
        "Created employee"
    );
    Ok(employee_id)
}
