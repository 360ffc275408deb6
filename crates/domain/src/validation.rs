// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::task::NewTask;
use crate::types::{Contract, Employee, EmployeeId, RelocationRequest};
use std::collections::HashSet;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// The date format used for persistence and the API.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validates the caller-supplied fields of a new task.
///
/// # Errors
///
/// Returns `DomainError::InvalidTask` if the type or description is empty.
pub fn validate_task_fields(task: &NewTask) -> Result<(), DomainError> {
    if task.task_type.trim().is_empty() {
        return Err(DomainError::InvalidTask(String::from(
            "Task type cannot be empty",
        )));
    }

    if task.description.trim().is_empty() {
        return Err(DomainError::InvalidTask(String::from(
            "Task description cannot be empty",
        )));
    }

    Ok(())
}

/// Validates observation text and author.
///
/// # Errors
///
/// Returns `DomainError::InvalidObservation` if either is empty.
pub fn validate_observation(text: &str, author: &str) -> Result<(), DomainError> {
    // Rule: observation text must not be empty
    if text.trim().is_empty() {
        return Err(DomainError::InvalidObservation(String::from(
            "Observation text cannot be empty",
        )));
    }

    if author.trim().is_empty() {
        return Err(DomainError::InvalidObservation(String::from(
            "Observation author cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a relocation request and the employees it names.
///
/// Checks field constraints, that at least one employee is named, and that
/// no employee appears twice. Open-record conflicts need persisted state and
/// are checked when the request is opened.
///
/// # Errors
///
/// Returns `InvalidRequest`, `EmptyRequest` or `DuplicateEmployee`.
pub fn validate_request(
    request: &RelocationRequest,
    employees: &[EmployeeId],
) -> Result<(), DomainError> {
    if request.requested_by.trim().is_empty() {
        return Err(DomainError::InvalidRequest(String::from(
            "Requester cannot be empty",
        )));
    }

    if request.justification.trim().is_empty() {
        return Err(DomainError::InvalidRequest(String::from(
            "Justification cannot be empty",
        )));
    }

    if request.destination_contract.is_some()
        && request.destination_contract == request.origin_contract
    {
        return Err(DomainError::InvalidRequest(String::from(
            "Origin and destination contracts must differ",
        )));
    }

    if employees.is_empty() {
        return Err(DomainError::EmptyRequest);
    }

    let mut seen: HashSet<EmployeeId> = HashSet::with_capacity(employees.len());
    for employee_id in employees {
        if !seen.insert(*employee_id) {
            return Err(DomainError::DuplicateEmployee(*employee_id));
        }
    }

    Ok(())
}

/// Validates an employee's basic fields.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmployee` if the name or registration is empty.
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    if employee.name.trim().is_empty() {
        return Err(DomainError::InvalidEmployee(String::from(
            "Name cannot be empty",
        )));
    }

    if employee.registration.trim().is_empty() {
        return Err(DomainError::InvalidEmployee(String::from(
            "Registration cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a contract's basic fields.
///
/// # Errors
///
/// Returns `DomainError::InvalidContract` if the code or name is empty.
pub fn validate_contract_fields(contract: &Contract) -> Result<(), DomainError> {
    if contract.code.trim().is_empty() {
        return Err(DomainError::InvalidContract(String::from(
            "Contract code cannot be empty",
        )));
    }

    if contract.name.trim().is_empty() {
        return Err(DomainError::InvalidContract(String::from(
            "Contract name cannot be empty",
        )));
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}
