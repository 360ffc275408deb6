// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{seed_contract, seed_employee};
use crate::{Persistence, PersistenceError};
use reloc_domain::{ActivationState, ContractId, EmployeeId};

#[test]
fn test_in_memory_database_initializes() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();
    persistence.verify_schema().unwrap();
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = Persistence::new_in_memory().unwrap();

    let employee_id = seed_employee(&mut first, "R-0001", None);

    assert!(first.get_employee(employee_id).is_ok());
    assert!(matches!(
        second.get_employee(employee_id),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_employee_round_trips_with_contract() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let contract_id = seed_contract(&mut persistence, "C-100");
    let employee_id = seed_employee(&mut persistence, "R-0001", Some(contract_id));

    let employee = persistence.get_employee(employee_id).unwrap();
    assert_eq!(employee.employee_id, Some(employee_id));
    assert_eq!(employee.registration, "R-0001");
    assert_eq!(employee.activation, ActivationState::Active);
    assert!(!employee.in_migration);
    assert_eq!(employee.active_contract, Some(contract_id));
    assert_eq!(
        persistence.get_contract(contract_id).unwrap().code,
        "C-100"
    );
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    seed_employee(&mut persistence, "R-0001", None);

    let result = persistence.create_employee(&reloc_domain::Employee::new(
        String::from("Someone else"),
        String::from("R-0001"),
        ActivationState::Active,
        None,
    ));
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));
}

#[test]
fn test_employee_with_unknown_contract_violates_foreign_key() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let result = persistence.create_employee(&reloc_domain::Employee::new(
        String::from("Nobody"),
        String::from("R-0009"),
        ActivationState::Inactive,
        Some(ContractId::new(999)),
    ));
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));
}

#[test]
fn test_missing_employee_is_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.get_employee(EmployeeId::new(42)),
        Err(PersistenceError::NotFound(_))
    ));
}
