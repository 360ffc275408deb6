// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{OpenedRequest, Persistence, PersistTransitionResult};
use reloc::{Command, RecordState, TaskCommand, apply, apply_task, open_request};
use reloc_audit::{Actor, Cause};
use reloc_domain::{
    ActivationState, Contract, ContractId, Employee, EmployeeId, NewTask, Priority, RecordId,
    RelocationRequest, RequestType, Sector,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const NOW: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("ana"), String::from("logistics"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Logistics request"))
}

pub fn new_task(sector: Sector, task_type: &str) -> NewTask {
    NewTask {
        task_type: String::from(task_type),
        description: format!("{task_type} for the relocation"),
        sector,
        priority: Priority::High,
        due_date: Some(date!(2026 - 03 - 20)),
    }
}

pub fn seed_contract(persistence: &mut Persistence, code: &str) -> ContractId {
    persistence
        .create_contract(&Contract {
            contract_id: None,
            code: String::from(code),
            name: format!("Contract {code}"),
        })
        .unwrap()
}

pub fn seed_employee(
    persistence: &mut Persistence,
    registration: &str,
    active_contract: Option<ContractId>,
) -> EmployeeId {
    persistence
        .create_employee(&Employee::new(
            format!("Employee {registration}"),
            String::from(registration),
            ActivationState::Active,
            active_contract,
        ))
        .unwrap()
}

pub fn request(
    request_type: RequestType,
    origin: Option<ContractId>,
    destination: Option<ContractId>,
    requires_approval: bool,
) -> RelocationRequest {
    RelocationRequest {
        request_id: None,
        request_type,
        origin_contract: origin,
        destination_contract: destination,
        requested_by: String::from("ana"),
        justification: String::from("Site staffing"),
        requested_on: date!(2026 - 03 - 01),
        requires_approval,
    }
}

/// Opens a request for the given employees and persists it.
pub fn open(
    persistence: &mut Persistence,
    request: RelocationRequest,
    employees: Vec<EmployeeId>,
) -> OpenedRequest {
    let open_records = persistence.list_open_records_for(&employees).unwrap();
    let result = open_request(
        request,
        employees,
        &open_records,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_open_request(&result, NOW).unwrap()
}

/// Seeds two contracts and one employee and opens a transfer for them.
pub fn open_transfer(persistence: &mut Persistence) -> (EmployeeId, RecordId) {
    let origin = seed_contract(persistence, "C-100");
    let destination = seed_contract(persistence, "C-200");
    let employee_id = seed_employee(persistence, "R-0001", Some(origin));
    let opened = open(
        persistence,
        request(RequestType::Transfer, Some(origin), Some(destination), false),
        vec![employee_id],
    );
    (employee_id, opened.record_ids[0])
}

/// Loads, applies and persists one record command.
pub fn run(
    persistence: &mut Persistence,
    record_id: RecordId,
    command: Command,
) -> PersistTransitionResult {
    let state: RecordState = persistence.load_record_state(record_id).unwrap();
    let result = apply(&state, command, create_test_actor(), create_test_cause(), NOW).unwrap();
    persistence
        .persist_transition(&result, state.record.version)
        .unwrap()
}

/// Loads, applies and persists one task command.
pub fn run_task(
    persistence: &mut Persistence,
    record_id: RecordId,
    command: TaskCommand,
) -> PersistTransitionResult {
    let state: RecordState = persistence.load_record_state(record_id).unwrap();
    let result =
        apply_task(&state, command, create_test_actor(), create_test_cause(), NOW).unwrap();
    persistence
        .persist_transition(&result, state.record.version)
        .unwrap()
}
