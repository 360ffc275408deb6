// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use reloc_audit::Cause;
use reloc_domain::{RecordId, RequestId, Sector, TaskId};
use reloc_persistence::Persistence;

use crate::{
    AuthenticatedActor, CreateContractRequest, CreateEmployeeRequest, GenerateStandardTasksRequest,
    OpenRequestRequest, Role, TransitionTaskRequest, create_contract, create_employee,
    generate_standard_tasks, open_request, transition_task,
};

pub const RETRIES: u32 = crate::DEFAULT_MAX_CONFLICT_RETRIES;

pub struct Fixture {
    pub origin: i64,
    pub destination: i64,
    pub employee: i64,
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-123"), Role::Admin)
}

pub fn create_test_logistics() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("logistics-7"), Role::Logistics)
}

pub fn create_test_sector_actor(sector: Sector) -> AuthenticatedActor {
    AuthenticatedActor::new(format!("{sector}-team"), Role::Sector(sector))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn seed(persistence: &mut Persistence) -> Fixture {
    let admin = create_test_admin();
    let origin = create_contract(
        persistence,
        &CreateContractRequest {
            code: String::from("C-100"),
            name: String::from("North site"),
        },
        &admin,
    )
    .unwrap();
    let destination = create_contract(
        persistence,
        &CreateContractRequest {
            code: String::from("C-200"),
            name: String::from("South site"),
        },
        &admin,
    )
    .unwrap();
    let employee = seed_employee(persistence, "R-0001", Some(origin.contract_id));

    Fixture {
        origin: origin.contract_id,
        destination: destination.contract_id,
        employee,
    }
}

pub fn seed_employee(
    persistence: &mut Persistence,
    registration: &str,
    contract_id: Option<i64>,
) -> i64 {
    create_employee(
        persistence,
        &CreateEmployeeRequest {
            name: format!("Employee {registration}"),
            registration: String::from(registration),
            activation: String::from("ACTIVE"),
            active_contract_id: contract_id,
        },
        &create_test_admin(),
    )
    .unwrap()
    .employee_id
}

pub fn transfer_request(fixture: &Fixture, employee_ids: Vec<i64>) -> OpenRequestRequest {
    OpenRequestRequest {
        request_type: String::from("TRANSFER"),
        origin_contract_id: Some(fixture.origin),
        destination_contract_id: Some(fixture.destination),
        justification: String::from("Site staffing"),
        requested_on: String::from("2026-03-01"),
        requires_approval: false,
        employee_ids,
    }
}

/// Seeds the directory and opens a transfer for one employee.
pub fn open_transfer(persistence: &mut Persistence) -> (Fixture, RequestId, RecordId) {
    let fixture = seed(persistence);
    let opened = open_request(
        persistence,
        &transfer_request(&fixture, vec![fixture.employee]),
        &create_test_logistics(),
        create_test_cause(),
    )
    .unwrap();
    let request_id = RequestId::new(opened.request_id);
    let record_id = RecordId::new(opened.record_ids[0]);
    (fixture, request_id, record_id)
}

/// Generates the HR standard tasks (two of them) and returns their ids.
pub fn generate_hr_tasks(persistence: &mut Persistence, record_id: RecordId) -> Vec<TaskId> {
    generate_standard_tasks(
        persistence,
        record_id,
        &GenerateStandardTasksRequest {
            sectors: vec![String::from("HR")],
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap()
    .created_task_ids
    .into_iter()
    .map(TaskId::new)
    .collect()
}

pub fn complete_task(persistence: &mut Persistence, task_id: TaskId) -> crate::TransitionResponse {
    transition_task(
        persistence,
        task_id,
        &TransitionTaskRequest {
            status: String::from("DONE"),
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap()
}
