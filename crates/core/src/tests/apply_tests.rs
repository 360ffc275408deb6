// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{NOW, create_test_actor, create_test_cause, record_state, task};
use crate::{Command, CoreError, Effect, RecordState, TransitionResult, apply};
use reloc_domain::{
    ActivationState, DocumentStatus, DomainError, DraftDocument, EmployeeId, Guard,
    ReadyDocument, RecordId, RequestId, RequestType, Sector, TaskGroupStatus, TaskStatus,
    WorkflowState,
};
use time::macros::datetime;

fn run(state: &RecordState, command: Command) -> Result<TransitionResult, CoreError> {
    apply(state, command, create_test_actor(), create_test_cause(), NOW)
}

#[test]
fn test_approve_moves_to_attending_tasks() {
    let state = record_state(RequestType::Transfer, WorkflowState::AwaitingApproval, vec![]);
    let result = run(&state, Command::ApproveRequest { sectors: vec![] }).unwrap();

    assert_eq!(
        result.new_state.workflow(),
        WorkflowState::AttendingTasks {
            document: DraftDocument::Pending
        }
    );
    assert!(result.new_state.tasks.is_empty());
    assert!(result.effects.is_empty());
}

#[test]
fn test_approve_with_sectors_generates_standard_tasks() {
    let state = record_state(RequestType::Transfer, WorkflowState::AwaitingApproval, vec![]);
    let result = run(
        &state,
        Command::ApproveRequest {
            sectors: vec![Sector::Hr, Sector::Medicine],
        },
    )
    .unwrap();

    let tasks = &result.new_state.tasks;
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|t| t.task_id.is_none()));
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
    assert!(tasks.iter().all(|t| t.record_id == RecordId::new(1)));
    assert_eq!(
        result.new_state.workflow().task_group(),
        TaskGroupStatus::AttendTasks
    );
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Generated 3 standard task(s)")
    );
}

#[test]
fn test_reject_is_terminal_and_creates_no_tasks() {
    let state = record_state(RequestType::Allocation, WorkflowState::AwaitingApproval, vec![]);
    let result = run(&state, Command::RejectRequest).unwrap();

    assert_eq!(result.new_state.workflow(), WorkflowState::RequestRejected);
    assert!(result.new_state.tasks.is_empty());
    assert_eq!(
        result.effects,
        vec![Effect::ClearInMigration {
            employee_id: EmployeeId::new(10)
        }]
    );
}

#[test]
fn test_create_draft_requires_approval() {
    let state = record_state(RequestType::Transfer, WorkflowState::AwaitingApproval, vec![]);
    let result = run(&state, Command::CreateDraft);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::GuardNotSatisfied {
            guard: Guard::RecordApproved,
            task_group: TaskGroupStatus::ApproveRequest,
            document: DocumentStatus::Pending,
        }))
    );
}

#[test]
fn test_submit_draft_stores_observation() {
    let state = record_state(
        RequestType::Transfer,
        WorkflowState::DraftReady {
            document: ReadyDocument::Created,
        },
        vec![task(1, Sector::Hr, TaskStatus::Done)],
    );
    let result = run(
        &state,
        Command::SubmitDraft {
            observation: Some(String::from("Signed by the site manager")),
        },
    )
    .unwrap();

    assert_eq!(result.new_state.workflow(), WorkflowState::Submitted);
    assert_eq!(
        result.new_state.record.document_observation.as_deref(),
        Some("Signed by the site manager")
    );
    assert!(result.effects.is_empty());
}

#[test]
fn test_blank_observation_is_ignored() {
    let state = record_state(RequestType::Transfer, WorkflowState::UnderValidation, vec![]);
    let result = run(
        &state,
        Command::InvalidateDocument {
            observation: Some(String::from("   ")),
        },
    )
    .unwrap();

    assert_eq!(result.new_state.record.document_observation, None);
    assert_eq!(result.audit_event.action.details, None);
}

#[test]
fn test_begin_validation_sets_returned_from_document() {
    let state = record_state(RequestType::Transfer, WorkflowState::Submitted, vec![]);
    let result = run(&state, Command::BeginValidation).unwrap();

    assert_eq!(
        result.new_state.workflow().task_group(),
        TaskGroupStatus::ReturnedFromDocument
    );
    assert_eq!(
        result.new_state.workflow().document(),
        DocumentStatus::UnderValidation
    );
}

#[test]
fn test_validate_allocation_effects() {
    let state = record_state(RequestType::Allocation, WorkflowState::UnderValidation, vec![]);
    let result = run(&state, Command::ValidateDocument).unwrap();

    assert_eq!(
        result.effects,
        vec![
            Effect::SetActivationState {
                employee_id: EmployeeId::new(10),
                state: ActivationState::Active,
            },
            Effect::ClearInMigration {
                employee_id: EmployeeId::new(10)
            },
        ]
    );
}

#[test]
fn test_cancel_cancels_every_open_task() {
    let state = record_state(
        RequestType::Transfer,
        WorkflowState::AttendingTasks {
            document: DraftDocument::Created,
        },
        vec![
            task(1, Sector::Hr, TaskStatus::Done),
            task(2, Sector::Medicine, TaskStatus::InProgress),
            task(3, Sector::Training, TaskStatus::Pending),
            task(4, Sector::Training, TaskStatus::Rejected),
        ],
    );
    let result = run(
        &state,
        Command::CancelRecord {
            reason: Some(String::from("Employee declined")),
        },
    )
    .unwrap();

    let statuses: Vec<TaskStatus> = result.new_state.tasks.iter().map(|t| t.status).collect();
    assert_eq!(
        statuses,
        vec![
            TaskStatus::Done,
            TaskStatus::Cancelled,
            TaskStatus::Cancelled,
            TaskStatus::Cancelled
        ]
    );
    assert_eq!(result.new_state.workflow(), WorkflowState::Cancelled);
    assert_eq!(
        result.effects,
        vec![Effect::ClearInMigration {
            employee_id: EmployeeId::new(10)
        }]
    );
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Employee declined (3 task(s) cancelled)")
    );
}

#[test]
fn test_transition_emits_scoped_audit_event() {
    let state = record_state(RequestType::Transfer, WorkflowState::Submitted, vec![]);
    let result = run(&state, Command::BeginValidation).unwrap();

    let event = &result.audit_event;
    assert_eq!(event.action.name, "BeginValidation");
    assert_eq!(event.request_id, Some(RequestId::new(1)));
    assert_eq!(event.record_id, Some(RecordId::new(1)));
    assert_eq!(event.actor, create_test_actor());
    assert_eq!(event.cause, create_test_cause());
    assert_eq!(
        event.before.data,
        "record=1,state=(SUBMIT_DRAFT, SUBMITTED),tasks_count=0"
    );
    assert_eq!(
        event.after.data,
        "record=1,state=(RETURNED_FROM_DOCUMENT, UNDER_VALIDATION),tasks_count=0"
    );
}

#[test]
fn test_transition_stamps_updated_at() {
    let state = record_state(RequestType::Transfer, WorkflowState::Submitted, vec![]);
    let later = datetime!(2026-04-01 12:00 UTC);
    let result = apply(
        &state,
        Command::BeginValidation,
        create_test_actor(),
        create_test_cause(),
        later,
    )
    .unwrap();

    assert_eq!(result.new_state.record.updated_at, later);
    assert_eq!(state.record.updated_at, NOW);
}

#[test]
fn test_apply_does_not_touch_version() {
    let state = record_state(RequestType::Transfer, WorkflowState::Submitted, vec![]);
    let result = run(&state, Command::BeginValidation).unwrap();
    assert_eq!(result.new_state.record.version, state.record.version);
}
