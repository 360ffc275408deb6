// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Exhaustive checks over every composite state and a spread of task sets.

use crate::tests::helpers::{
    InMemoryDirectory, NOW, create_test_actor, create_test_cause, new_task, record_state, task,
};
use crate::{Command, CoreError, Effect, RecordState, TaskCommand, apply, apply_effects, apply_task};
use reloc_domain::{
    ActivationState, DocumentStatus, DomainError, DraftDocument, EmployeeId, ReadyDocument,
    RequestType, Sector, Task, TaskGroupStatus, TaskId, TaskStatus, WorkflowState,
    sector_progress,
};

const ALL_STATES: [WorkflowState; 12] = [
    WorkflowState::AwaitingApproval,
    WorkflowState::RequestRejected,
    WorkflowState::AttendingTasks {
        document: DraftDocument::Pending,
    },
    WorkflowState::AttendingTasks {
        document: DraftDocument::Created,
    },
    WorkflowState::DraftReady {
        document: ReadyDocument::Pending,
    },
    WorkflowState::DraftReady {
        document: ReadyDocument::Created,
    },
    WorkflowState::DraftReady {
        document: ReadyDocument::Invalidated,
    },
    WorkflowState::Submitted,
    WorkflowState::UnderValidation,
    WorkflowState::RemediatingTasks,
    WorkflowState::Completed,
    WorkflowState::Cancelled,
];

fn task_sets() -> Vec<Vec<Task>> {
    vec![
        vec![],
        vec![task(1, Sector::Hr, TaskStatus::Pending)],
        vec![task(1, Sector::Hr, TaskStatus::Done)],
        vec![
            task(1, Sector::Hr, TaskStatus::Done),
            task(2, Sector::Medicine, TaskStatus::InProgress),
        ],
        vec![
            task(1, Sector::Hr, TaskStatus::Done),
            task(2, Sector::Training, TaskStatus::Rejected),
        ],
    ]
}

fn all_commands() -> Vec<Command> {
    vec![
        Command::ApproveRequest { sectors: vec![] },
        Command::RejectRequest,
        Command::CreateDraft,
        Command::SubmitDraft { observation: None },
        Command::BeginValidation,
        Command::ValidateDocument,
        Command::InvalidateDocument { observation: None },
        Command::CancelRecord { reason: None },
    ]
}

/// At least one task and every task `DONE`.
fn all_done(tasks: &[Task]) -> bool {
    !tasks.is_empty() && tasks.iter().all(|t| t.status == TaskStatus::Done)
}

/// A stored record state only holds a `SUBMIT_DRAFT` family state with a
/// concluded task set; skip the combinations reconciliation never produces.
fn reachable(state: WorkflowState, tasks: &[Task]) -> bool {
    match state {
        WorkflowState::DraftReady { .. } => all_done(tasks),
        WorkflowState::AwaitingApproval | WorkflowState::RequestRejected => tasks.is_empty(),
        _ => true,
    }
}

fn states_with_tasks() -> Vec<RecordState> {
    let mut out: Vec<RecordState> = Vec::new();
    for state in ALL_STATES {
        for tasks in task_sets() {
            if reachable(state, &tasks) {
                out.push(record_state(RequestType::Transfer, state, tasks));
            }
        }
    }
    out
}

#[test]
fn test_submit_succeeds_iff_guards_hold() {
    for state in states_with_tasks() {
        let workflow: WorkflowState = state.workflow();
        let expected: bool = workflow.task_group() == TaskGroupStatus::SubmitDraft
            && all_done(&state.tasks)
            && matches!(
                workflow.document(),
                DocumentStatus::Created | DocumentStatus::Invalidated
            );

        let result = apply(
            &state,
            Command::SubmitDraft { observation: None },
            create_test_actor(),
            create_test_cause(),
            NOW,
        );
        assert_eq!(result.is_ok(), expected, "state {workflow}");
    }
}

#[test]
fn test_only_validation_changes_activation() {
    for request_type in [
        RequestType::Allocation,
        RequestType::Transfer,
        RequestType::Termination,
    ] {
        for state in states_with_tasks() {
            let state = RecordState {
                request_type,
                ..state
            };
            for command in all_commands() {
                let is_validation: bool = command == Command::ValidateDocument;
                let Ok(result) = apply(
                    &state,
                    command,
                    create_test_actor(),
                    create_test_cause(),
                    NOW,
                ) else {
                    continue;
                };

                let touches_activation: bool = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::SetActivationState { .. }));
                assert_eq!(touches_activation, is_validation);
                assert_eq!(
                    result.new_state.workflow().document() == DocumentStatus::Validated,
                    is_validation
                );
            }
        }
    }
}

#[test]
fn test_terminal_records_reject_every_command() {
    for state in states_with_tasks()
        .into_iter()
        .filter(|s| s.workflow().is_terminal())
    {
        for command in all_commands() {
            let result = apply(
                &state,
                command,
                create_test_actor(),
                create_test_cause(),
                NOW,
            );
            assert!(matches!(
                result,
                Err(CoreError::DomainViolation(DomainError::TerminalState { .. }))
            ));
        }
    }
}

#[test]
fn test_done_task_rejects_every_transition() {
    let state = record_state(
        RequestType::Transfer,
        WorkflowState::AttendingTasks {
            document: DraftDocument::Pending,
        },
        vec![
            task(1, Sector::Hr, TaskStatus::Done),
            task(2, Sector::Hr, TaskStatus::Pending),
        ],
    );
    for target in [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::Rejected,
        TaskStatus::Cancelled,
    ] {
        let result = apply_task(
            &state,
            TaskCommand::Transition {
                task_id: TaskId::new(1),
                target,
            },
            create_test_actor(),
            create_test_cause(),
            NOW,
        );
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(DomainError::TerminalState { .. }))
        ));
    }
}

#[test]
fn test_failed_transition_leaves_everything_unchanged() {
    let employee_id: EmployeeId = EmployeeId::new(10);
    for state in states_with_tasks() {
        for command in all_commands() {
            let mut directory =
                InMemoryDirectory::with_employee(employee_id, ActivationState::Active);
            let employee_before = directory.row(employee_id).clone();
            let state_before: RecordState = state.clone();

            match apply(
                &state,
                command,
                create_test_actor(),
                create_test_cause(),
                NOW,
            ) {
                Ok(result) => apply_effects(&mut directory, &result.effects).unwrap(),
                Err(_) => {
                    assert_eq!(state, state_before);
                    assert_eq!(directory.row(employee_id), &employee_before);
                }
            }
        }
    }
}

#[test]
fn test_failed_task_command_leaves_state_unchanged() {
    let state = record_state(RequestType::Transfer, WorkflowState::Submitted, vec![]);
    let before: RecordState = state.clone();
    let result = apply_task(
        &state,
        TaskCommand::Create(new_task(Sector::Hr, "LATE")),
        create_test_actor(),
        create_test_cause(),
        NOW,
    );
    assert!(result.is_err());
    assert_eq!(state, before);
}

#[test]
fn test_progress_done_sums_to_done_tasks() {
    for tasks in task_sets() {
        let progress = sector_progress(&tasks);
        let done_total: usize = progress.iter().map(|p| p.done).sum();
        let done_tasks: usize = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();
        assert_eq!(done_total, done_tasks);
        for entry in progress {
            if entry.total == 0 {
                assert_eq!(entry.percent, 0);
            } else {
                assert_eq!(entry.percent, entry.done * 100 / entry.total);
            }
        }
    }
}
