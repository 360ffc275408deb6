// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    NOW, create_test_actor, create_test_cause, open, open_transfer, request, run, seed_contract,
    seed_employee,
};
use crate::{Persistence, PersistenceError};
use reloc::{Command, open_request};
use reloc_domain::{RequestType, WorkflowState};

#[test]
fn test_open_request_creates_one_record_per_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let destination = seed_contract(&mut persistence, "C-200");
    let first = seed_employee(&mut persistence, "R-0001", None);
    let second = seed_employee(&mut persistence, "R-0002", None);

    let opened = open(
        &mut persistence,
        request(RequestType::Allocation, None, Some(destination), false),
        vec![first, second],
    );

    let records = persistence
        .list_records_for_request(opened.request_id)
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].employee_id, first);
    assert_eq!(records[1].employee_id, second);
    assert!(records.iter().all(|r| r.version == 0));
    assert!(records.iter().all(|r| r.updated_at == NOW));
    assert!(records.iter().all(|r| r.state == WorkflowState::initial(false)));

    let stored = persistence.get_request(opened.request_id).unwrap();
    assert_eq!(stored.request_id, Some(opened.request_id));
    assert!(stored.is_new_hire());
}

#[test]
fn test_open_request_marks_employees_in_migration() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (employee_id, _) = open_transfer(&mut persistence);

    assert!(persistence.get_employee(employee_id).unwrap().in_migration);
}

#[test]
fn test_approval_requests_start_awaiting_approval() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let employee_id = seed_employee(&mut persistence, "R-0001", None);
    let opened = open(
        &mut persistence,
        request(RequestType::Allocation, None, None, true),
        vec![employee_id],
    );

    let state = persistence
        .load_record_state(opened.record_ids[0])
        .unwrap();
    assert_eq!(state.workflow(), WorkflowState::AwaitingApproval);
    assert_eq!(state.request_type, RequestType::Allocation);
}

#[test]
fn test_second_open_record_for_employee_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (employee_id, record_id) = open_transfer(&mut persistence);

    let open_records = persistence.list_open_records_for(&[employee_id]).unwrap();
    assert_eq!(open_records, vec![(employee_id, record_id)]);

    // Skipping the engine check still cannot produce a second open record.
    let stale = open_request(
        request(RequestType::Termination, None, None, false),
        vec![employee_id],
        &[],
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let result = persistence.persist_open_request(&stale, NOW);
    assert_eq!(
        result,
        Err(PersistenceError::EmployeeAlreadyInRelocation {
            employee_id,
            record_id,
        })
    );
}

#[test]
fn test_terminal_record_frees_employee() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (employee_id, record_id) = open_transfer(&mut persistence);
    run(&mut persistence, record_id, Command::CancelRecord { reason: None });

    assert!(persistence.list_open_records_for(&[employee_id]).unwrap().is_empty());
    let employee = persistence.get_employee(employee_id).unwrap();
    assert!(!employee.in_migration);

    let reopened = open(
        &mut persistence,
        request(RequestType::Termination, None, None, false),
        vec![employee_id],
    );
    assert_eq!(reopened.record_ids.len(), 1);
}

#[test]
fn test_open_request_for_unknown_employee_writes_nothing() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let known = seed_employee(&mut persistence, "R-0001", None);
    let unknown = reloc_domain::EmployeeId::new(999);

    let result = open_request(
        request(RequestType::Allocation, None, None, false),
        vec![known, unknown],
        &[],
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let persisted = persistence.persist_open_request(&result, NOW);

    assert!(matches!(
        persisted,
        Err(PersistenceError::ConstraintViolation(_))
    ));
    assert!(!persistence.get_employee(known).unwrap().in_migration);
    assert!(persistence.list_open_records_for(&[known]).unwrap().is_empty());
}
