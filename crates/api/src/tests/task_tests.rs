// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reloc::Command;
use reloc_domain::TaskId;

use crate::tests::helpers::{
    RETRIES, complete_task, create_test_cause, create_test_logistics, generate_hr_tasks,
    new_persistence, open_transfer,
};
use crate::{
    ApiError, CreateTaskRequest, GenerateStandardTasksRequest, TaskDateRequest,
    TransitionTaskRequest, apply_record_command, create_task, delete_task, extend_task_due_date,
    generate_standard_tasks, get_record, set_task_due_date, transition_task,
};

fn medicine_task_request() -> CreateTaskRequest {
    CreateTaskRequest {
        task_type: String::from("ASO"),
        description: String::from("Occupational exam"),
        sector: String::from("MEDICINE"),
        priority: Some(String::from("HIGH")),
        due_date: Some(String::from("2026-03-20")),
    }
}

#[test]
fn test_create_task_returns_new_id() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);

    let response = create_task(
        &mut persistence,
        record_id,
        &medicine_task_request(),
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();

    assert_eq!(response.action, "CreateTask");
    assert_eq!(response.created_task_ids.len(), 1);
    let task = &response.record.tasks[0];
    assert_eq!(task.task_id, response.created_task_ids[0]);
    assert_eq!(task.priority, "HIGH");
    assert_eq!(task.due_date.as_deref(), Some("2026-03-20"));
    assert_eq!(task.status, "PENDING");
}

#[test]
fn test_create_task_defaults_priority() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let request = CreateTaskRequest {
        priority: None,
        due_date: None,
        ..medicine_task_request()
    };

    let response = create_task(
        &mut persistence,
        record_id,
        &request,
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();
    assert_eq!(response.record.tasks[0].priority, "MEDIUM");
    assert_eq!(response.record.tasks[0].due_date, None);
}

#[test]
fn test_create_task_with_bad_date_is_invalid_input() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let request = CreateTaskRequest {
        due_date: Some(String::from("20/03/2026")),
        ..medicine_task_request()
    };

    let result = create_task(
        &mut persistence,
        record_id,
        &request,
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[test]
fn test_create_task_after_submission_is_invalid_state() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let tasks = generate_hr_tasks(&mut persistence, record_id);
    for task_id in tasks {
        complete_task(&mut persistence, task_id);
    }
    for command in [
        Command::CreateDraft,
        Command::SubmitDraft { observation: None },
    ] {
        apply_record_command(
            &mut persistence,
            record_id,
            &command,
            &create_test_logistics(),
            &create_test_cause(),
            RETRIES,
        )
        .unwrap();
    }

    let result = create_task(
        &mut persistence,
        record_id,
        &medicine_task_request(),
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    );
    assert!(matches!(result, Err(ApiError::InvalidState { .. })));
}

#[test]
fn test_new_task_moves_record_back_from_submit_draft() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let tasks = generate_hr_tasks(&mut persistence, record_id);
    for task_id in tasks {
        complete_task(&mut persistence, task_id);
    }
    assert_eq!(
        get_record(&mut persistence, record_id).unwrap().task_group,
        "SUBMIT_DRAFT"
    );

    let response = create_task(
        &mut persistence,
        record_id,
        &medicine_task_request(),
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();
    assert_eq!(response.record.task_group, "ATTEND_TASKS");
}

#[test]
fn test_done_task_rejects_further_transitions() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let tasks = generate_hr_tasks(&mut persistence, record_id);
    complete_task(&mut persistence, tasks[0]);

    let result = transition_task(
        &mut persistence,
        tasks[0],
        &TransitionTaskRequest {
            status: String::from("IN_PROGRESS"),
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    );
    assert!(matches!(result, Err(ApiError::TerminalState { .. })));
}

#[test]
fn test_transition_unknown_task_is_not_found() {
    let mut persistence = new_persistence();
    let result = transition_task(
        &mut persistence,
        TaskId::new(77),
        &TransitionTaskRequest {
            status: String::from("DONE"),
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    );
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Task"
    ));
}

#[test]
fn test_due_date_and_extension() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let created = create_task(
        &mut persistence,
        record_id,
        &medicine_task_request(),
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();
    let task_id = TaskId::new(created.created_task_ids[0]);

    set_task_due_date(
        &mut persistence,
        task_id,
        &TaskDateRequest {
            date: Some(String::from("2026-04-01")),
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();
    let extended = extend_task_due_date(
        &mut persistence,
        task_id,
        &TaskDateRequest {
            date: Some(String::from("2026-04-15")),
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();

    let task = &extended.record.tasks[0];
    assert_eq!(task.due_date.as_deref(), Some("2026-04-01"));
    assert_eq!(task.due_date_extension.as_deref(), Some("2026-04-15"));
}

#[test]
fn test_hr_task_cannot_be_extended() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let tasks = generate_hr_tasks(&mut persistence, record_id);

    let result = extend_task_due_date(
        &mut persistence,
        tasks[0],
        &TaskDateRequest {
            date: Some(String::from("2026-04-15")),
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    );
    assert!(matches!(result, Err(ApiError::InvalidState { .. })));
}

#[test]
fn test_delete_task_reconciles_record() {
    let mut persistence = new_persistence();
    let (_, _, record_id) = open_transfer(&mut persistence);
    let tasks = generate_hr_tasks(&mut persistence, record_id);
    complete_task(&mut persistence, tasks[0]);

    let response = delete_task(
        &mut persistence,
        tasks[1],
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    )
    .unwrap();

    assert_eq!(response.record.tasks.len(), 1);
    assert_eq!(response.record.task_group, "SUBMIT_DRAFT");
}

#[test]
fn test_generate_for_sector_without_catalogue_fails() {
    let mut persistence = new_persistence();
    let fixture = crate::tests::helpers::seed(&mut persistence);
    let request = crate::OpenRequestRequest {
        request_type: String::from("TERMINATION"),
        destination_contract_id: None,
        ..crate::tests::helpers::transfer_request(&fixture, vec![fixture.employee])
    };
    let opened = crate::open_request(
        &mut persistence,
        &request,
        &create_test_logistics(),
        create_test_cause(),
    )
    .unwrap();

    let result = generate_standard_tasks(
        &mut persistence,
        reloc_domain::RecordId::new(opened.record_ids[0]),
        &GenerateStandardTasksRequest {
            sectors: vec![String::from("TRAINING")],
        },
        &create_test_logistics(),
        &create_test_cause(),
        RETRIES,
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "task"
    ));
}
