// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, TaskCommand};
use crate::effects::Effect;
use crate::error::CoreError;
use crate::state::{OpenRequestResult, RecordState, TransitionResult};
use reloc_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use reloc_domain::{
    DomainError, EmployeeId, NewTask, RecordId, RelocationRequest, RequestType, Sector, Task,
    TaskId, WorkflowState, standard_task_batch, validate_request, validate_task_fields,
};
use time::OffsetDateTime;

/// Applies a record-level command, producing a new state, effects and audit event.
///
/// # Arguments
///
/// * `state` - The current record state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The transition timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The record is terminal (`TerminalState`, checked first)
/// - A guard of the transition does not hold (`GuardNotSatisfied`)
pub fn apply(
    state: &RecordState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let current: WorkflowState = state.workflow();
    let employee_id: EmployeeId = state.employee_id();
    let action_name: &'static str = command.name();
    let mut new_state: RecordState = state.clone();
    let mut effects: Vec<Effect> = Vec::new();

    let details: Option<String> = match command {
        Command::ApproveRequest { sectors } => {
            new_state.record.state = current.approve()?;
            if sectors.is_empty() {
                None
            } else {
                let created: usize = append_standard_tasks(&mut new_state, &sectors, now);
                new_state.record.state = new_state.record.state.reconcile_tasks(&new_state.tasks);
                Some(format!("Generated {created} standard task(s)"))
            }
        }
        Command::RejectRequest => {
            new_state.record.state = current.reject()?;
            effects.push(Effect::ClearInMigration { employee_id });
            None
        }
        Command::CreateDraft => {
            new_state.record.state = current.create_draft()?;
            None
        }
        Command::SubmitDraft { observation } => {
            new_state.record.state = current.submit_draft(&state.tasks)?;
            set_observation(&mut new_state, observation)
        }
        Command::BeginValidation => {
            new_state.record.state = current.begin_validation()?;
            None
        }
        Command::ValidateDocument => {
            new_state.record.state = current.validate()?;
            effects.push(Effect::SetActivationState {
                employee_id,
                state: state.request_type.resulting_activation(),
            });
            effects.push(Effect::ClearInMigration { employee_id });
            if state.request_type == RequestType::Termination {
                effects.push(Effect::ClearActiveContract { employee_id });
            }
            None
        }
        Command::InvalidateDocument { observation } => {
            new_state.record.state = current.invalidate()?;
            set_observation(&mut new_state, observation)
        }
        Command::CancelRecord { reason } => {
            new_state.record.state = current.cancel()?;
            let cancelled: usize = new_state
                .tasks
                .iter_mut()
                .map(Task::cancel)
                .filter(|changed| *changed)
                .count();
            effects.push(Effect::ClearInMigration { employee_id });
            Some(match reason {
                Some(reason) => format!("{reason} ({cancelled} task(s) cancelled)"),
                None => format!("{cancelled} task(s) cancelled"),
            })
        }
    };

    new_state.record.updated_at = now;
    Ok(finish(
        state,
        new_state,
        Vec::new(),
        effects,
        Action::new(String::from(action_name), details),
        actor,
        cause,
    ))
}

/// Applies a task-registry command to one record.
///
/// After every successful mutation the task-group axis is re-evaluated so
/// that a concluded task set advances the record to `SUBMIT_DRAFT` in the
/// same transition, and a new open task moves it back.
///
/// # Errors
///
/// Returns an error if:
/// - Tasks are created while the document is submitted or validated, or
///   before approval (`InvalidState`)
/// - The record is terminal (`TerminalState`)
/// - The task does not belong to the record (`TaskNotFound`)
/// - The task-level rule rejects the change
pub fn apply_task(
    state: &RecordState,
    command: TaskCommand,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let current: WorkflowState = state.workflow();
    if command.creates_tasks() {
        current.ensure_accepts_new_tasks()?;
    } else {
        current.ensure_not_terminal()?;
    }

    let action_name: &'static str = command.name();
    let mut new_state: RecordState = state.clone();
    let mut deleted_tasks: Vec<TaskId> = Vec::new();

    let details: String = match command {
        TaskCommand::Create(new_task) => {
            validate_task_fields(&new_task)?;
            let summary: String = format!("{} task '{}'", new_task.sector, new_task.task_type);
            new_state
                .tasks
                .push(Task::new(state.record_id, new_task, now));
            format!("Created {summary}")
        }
        TaskCommand::Transition { task_id, target } => {
            let task: &mut Task = find_task(&mut new_state.tasks, task_id)?;
            let from = task.status;
            task.transition(target, now)?;
            format!("Task {task_id}: {from} -> {target}")
        }
        TaskCommand::SetDueDate { task_id, due_date } => {
            find_task(&mut new_state.tasks, task_id)?.set_due_date(due_date)?;
            format!("Task {task_id}: due date {}", describe_date(due_date))
        }
        TaskCommand::ExtendDueDate { task_id, extension } => {
            find_task(&mut new_state.tasks, task_id)?.extend_due_date(extension)?;
            format!("Task {task_id}: extension {}", describe_date(extension))
        }
        TaskCommand::Delete { task_id } => {
            let index: usize = task_index(&new_state.tasks, task_id)?;
            new_state.tasks[index].ensure_deletable()?;
            new_state.tasks.remove(index);
            deleted_tasks.push(task_id);
            format!("Deleted task {task_id}")
        }
        TaskCommand::GenerateStandardTasks { sectors } => {
            let created: usize = append_standard_tasks(&mut new_state, &sectors, now);
            if created == 0 {
                return Err(CoreError::DomainViolation(DomainError::InvalidTask(
                    format!(
                        "No standard tasks exist for {} in a {} request",
                        describe_sectors(&sectors),
                        state.request_type
                    ),
                )));
            }
            format!("Generated {created} standard task(s)")
        }
    };

    new_state.record.state = current.reconcile_tasks(&new_state.tasks);
    new_state.record.updated_at = now;

    Ok(finish(
        state,
        new_state,
        deleted_tasks,
        Vec::new(),
        Action::new(String::from(action_name), Some(details)),
        actor,
        cause,
    ))
}

/// Validates a new relocation request and computes its initial records.
///
/// # Arguments
///
/// * `request` - The request to open
/// * `employees` - One record is opened per employee
/// * `open_records` - Existing non-terminal records of any of these employees
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The request fields are invalid, no employee is named, or an employee
///   is named twice
/// - An employee already has an open record (`EmployeeAlreadyInRelocation`)
pub fn open_request(
    request: RelocationRequest,
    employees: Vec<EmployeeId>,
    open_records: &[(EmployeeId, RecordId)],
    actor: Actor,
    cause: Cause,
) -> Result<OpenRequestResult, CoreError> {
    validate_request(&request, &employees)?;

    if let Some((employee_id, record_id)) = open_records
        .iter()
        .find(|(employee_id, _)| employees.contains(employee_id))
    {
        return Err(CoreError::DomainViolation(
            DomainError::EmployeeAlreadyInRelocation {
                employee_id: *employee_id,
                record_id: *record_id,
            },
        ));
    }

    let initial_state: WorkflowState = WorkflowState::initial(request.requires_approval);
    let effects: Vec<Effect> = employees
        .iter()
        .map(|employee_id| Effect::MarkInMigration {
            employee_id: *employee_id,
        })
        .collect();

    let action: Action = Action::new(
        String::from("OpenRequest"),
        Some(format!(
            "Opened {} request for {} employee(s)",
            request.request_type,
            employees.len()
        )),
    );
    let before: StateSnapshot = StateSnapshot::new(String::from("records_count=0"));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "records_count={},state={initial_state}",
        employees.len()
    ));
    let audit_event: AuditEvent =
        AuditEvent::for_request(actor, cause, action, before, after, request.request_id);

    Ok(OpenRequestResult {
        request,
        employees,
        initial_state,
        effects,
        audit_event,
    })
}

fn finish(
    state: &RecordState,
    new_state: RecordState,
    deleted_tasks: Vec<TaskId>,
    effects: Vec<Effect>,
    action: Action,
    actor: Actor,
    cause: Cause,
) -> TransitionResult {
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        state.to_snapshot(),
        new_state.to_snapshot(),
        state.request_id(),
        state.record_id,
    );

    TransitionResult {
        new_state,
        deleted_tasks,
        effects,
        audit_event,
    }
}

fn append_standard_tasks(
    state: &mut RecordState,
    sectors: &[Sector],
    now: OffsetDateTime,
) -> usize {
    let batch: Vec<NewTask> = standard_task_batch(state.request_type, sectors);
    let created: usize = batch.len();
    let record_id: RecordId = state.record_id;
    state
        .tasks
        .extend(batch.into_iter().map(|task| Task::new(record_id, task, now)));
    created
}

fn set_observation(state: &mut RecordState, observation: Option<String>) -> Option<String> {
    let observation: String = observation.filter(|text| !text.trim().is_empty())?;
    state.record.document_observation = Some(observation.clone());
    Some(observation)
}

fn task_index(tasks: &[Task], task_id: TaskId) -> Result<usize, DomainError> {
    tasks
        .iter()
        .position(|task| task.task_id == Some(task_id))
        .ok_or(DomainError::TaskNotFound(task_id))
}

fn find_task(tasks: &mut [Task], task_id: TaskId) -> Result<&mut Task, DomainError> {
    tasks
        .iter_mut()
        .find(|task| task.task_id == Some(task_id))
        .ok_or(DomainError::TaskNotFound(task_id))
}

fn describe_date(date: Option<time::Date>) -> String {
    date.map_or_else(|| String::from("cleared"), |d| format!("set to {d}"))
}

fn describe_sectors(sectors: &[Sector]) -> String {
    if sectors.is_empty() {
        return String::from("no sectors");
    }
    sectors
        .iter()
        .map(Sector::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
