// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{NOW, new_task, task_with_status};
use crate::{
    DomainError, EntityKind, Observation, RecordId, Sector, Task, TaskId, TaskStatus,
    tasks_concluded,
};
use time::macros::{date, datetime};

#[test]
fn test_new_task_is_pending() {
    let task: Task = Task::new(RecordId::new(7), new_task(Sector::Hr), NOW);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.task_id, None);
    assert_eq!(task.record_id, RecordId::new(7));
    assert_eq!(task.completed_at, None);
}

#[test]
fn test_done_stamps_completion() {
    let mut task: Task = task_with_status(1, Sector::Medicine, TaskStatus::InProgress);
    let later = datetime!(2026-03-05 14:30 UTC);
    task.transition(TaskStatus::Done, later).unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.completed_at, Some(later));
}

#[test]
fn test_rejected_does_not_stamp_completion() {
    let mut task: Task = task_with_status(1, Sector::Medicine, TaskStatus::Pending);
    task.transition(TaskStatus::Rejected, NOW).unwrap();
    assert_eq!(task.completed_at, None);
}

#[test]
fn test_done_task_rejects_transitions_with_terminal_state() {
    let mut task: Task = task_with_status(1, Sector::Hr, TaskStatus::Done);
    let result = task.transition(TaskStatus::InProgress, NOW);
    assert!(matches!(
        result,
        Err(DomainError::TerminalState {
            entity: EntityKind::Task,
            ..
        })
    ));
}

#[test]
fn test_due_date_blocked_when_done() {
    let mut task: Task = task_with_status(1, Sector::Hr, TaskStatus::Done);
    assert!(matches!(
        task.set_due_date(Some(date!(2026 - 04 - 01))),
        Err(DomainError::TerminalState { .. })
    ));

    let mut task: Task = task_with_status(2, Sector::Hr, TaskStatus::Rejected);
    task.set_due_date(Some(date!(2026 - 04 - 01))).unwrap();
    assert_eq!(task.due_date, Some(date!(2026 - 04 - 01)));
    task.set_due_date(None).unwrap();
    assert_eq!(task.due_date, None);
}

#[test]
fn test_extension_only_for_medicine_and_training() {
    let mut hr: Task = task_with_status(1, Sector::Hr, TaskStatus::Pending);
    assert!(matches!(
        hr.extend_due_date(Some(date!(2026 - 05 - 01))),
        Err(DomainError::InvalidState {
            entity: EntityKind::Task,
            ..
        })
    ));

    let mut training: Task = task_with_status(2, Sector::Training, TaskStatus::InProgress);
    training.extend_due_date(Some(date!(2026 - 05 - 01))).unwrap();
    assert_eq!(training.due_date_extension, Some(date!(2026 - 05 - 01)));
}

#[test]
fn test_done_task_cannot_be_deleted() {
    let task: Task = task_with_status(1, Sector::Hr, TaskStatus::Done);
    assert!(matches!(
        task.ensure_deletable(),
        Err(DomainError::InvalidState { .. })
    ));
    let task: Task = task_with_status(2, Sector::Hr, TaskStatus::Rejected);
    assert!(task.ensure_deletable().is_ok());
}

#[test]
fn test_cancel_keeps_done_tasks() {
    let mut done: Task = task_with_status(1, Sector::Hr, TaskStatus::Done);
    assert!(!done.cancel());
    assert_eq!(done.status, TaskStatus::Done);

    let mut rejected: Task = task_with_status(2, Sector::Hr, TaskStatus::Rejected);
    assert!(rejected.cancel());
    assert_eq!(rejected.status, TaskStatus::Cancelled);
}

#[test]
fn test_concluded_requires_every_task_done() {
    assert!(!tasks_concluded(&[]));
    assert!(!tasks_concluded(&[task_with_status(
        1,
        Sector::Hr,
        TaskStatus::Rejected
    )]));
    assert!(!tasks_concluded(&[
        task_with_status(1, Sector::Hr, TaskStatus::Rejected),
        task_with_status(2, Sector::Hr, TaskStatus::Done),
    ]));
    assert!(tasks_concluded(&[
        task_with_status(1, Sector::Hr, TaskStatus::Done),
        task_with_status(2, Sector::Medicine, TaskStatus::Done),
    ]));
    assert!(!tasks_concluded(&[
        task_with_status(1, Sector::Hr, TaskStatus::Done),
        task_with_status(2, Sector::Medicine, TaskStatus::InProgress),
    ]));
}

#[test]
fn test_observation_edit_keeps_author() {
    let mut observation: Observation = Observation::new(
        TaskId::new(3),
        String::from("Waiting for the clinic"),
        String::from("ana"),
        NOW,
    );
    let later = datetime!(2026-03-03 10:00 UTC);
    observation.edit(String::from("Exam booked"), String::from("bruno"), later);

    assert_eq!(observation.author, "ana");
    assert_eq!(observation.text, "Exam booked");
    assert_eq!(observation.modified_by.as_deref(), Some("bruno"));
    assert_eq!(observation.modified_at, Some(later));
}
