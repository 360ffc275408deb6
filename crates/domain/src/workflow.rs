// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Composite workflow state of a relocation record.
//!
//! A record moves along two axes at once: the task-group axis tracks sector
//! work toward draft submission, the document axis tracks the approval of the
//! relocation document. Only a fixed set of axis pairs is meaningful, so the
//! pair is modelled as a single tagged union and impossible combinations are
//! rejected when decoding stored values.
//!
//! Every transition here is pure. Terminal records are rejected before any
//! guard is evaluated.

use crate::error::{DomainError, EntityKind};
use crate::task::{Task, tasks_concluded};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Task-group axis of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskGroupStatus {
    /// The request has not been approved yet.
    ApproveRequest,
    /// Sectors are working on their tasks.
    AttendTasks,
    /// All tasks are concluded; the draft can be submitted.
    SubmitDraft,
    /// The document came back and is being validated.
    ReturnedFromDocument,
    /// The document was invalidated; tasks need remediation.
    RejectTasks,
    /// The relocation completed.
    RequestCompleted,
    /// The request was rejected before any work started.
    RequestRejected,
    /// The record was cancelled.
    Cancelled,
}

impl TaskGroupStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveRequest => "APPROVE_REQUEST",
            Self::AttendTasks => "ATTEND_TASKS",
            Self::SubmitDraft => "SUBMIT_DRAFT",
            Self::ReturnedFromDocument => "RETURNED_FROM_DOCUMENT",
            Self::RejectTasks => "REJECT_TASKS",
            Self::RequestCompleted => "REQUEST_COMPLETED",
            Self::RequestRejected => "REQUEST_REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "APPROVE_REQUEST" => Ok(Self::ApproveRequest),
            "ATTEND_TASKS" => Ok(Self::AttendTasks),
            "SUBMIT_DRAFT" => Ok(Self::SubmitDraft),
            "RETURNED_FROM_DOCUMENT" => Ok(Self::ReturnedFromDocument),
            "REJECT_TASKS" => Ok(Self::RejectTasks),
            "REQUEST_COMPLETED" => Ok(Self::RequestCompleted),
            "REQUEST_REJECTED" => Ok(Self::RequestRejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                kind: "task group status",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for TaskGroupStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for TaskGroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document axis of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    /// No draft exists yet.
    Pending,
    /// A draft has been created.
    Created,
    /// The draft was submitted for review.
    Submitted,
    /// The submitted document is being validated.
    UnderValidation,
    /// The document was validated.
    Validated,
    /// The document was invalidated and must be resubmitted.
    Invalidated,
    /// The document was cancelled along with the record.
    Cancelled,
}

impl DocumentStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Created => "CREATED",
            Self::Submitted => "SUBMITTED",
            Self::UnderValidation => "UNDER_VALIDATION",
            Self::Validated => "VALIDATED",
            Self::Invalidated => "INVALIDATED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CREATED" => Ok(Self::Created),
            "SUBMITTED" => Ok(Self::Submitted),
            "UNDER_VALIDATION" => Ok(Self::UnderValidation),
            "VALIDATED" => Ok(Self::Validated),
            "INVALIDATED" => Ok(Self::Invalidated),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                kind: "document status",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named preconditions of workflow transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// The record must still be awaiting approval.
    AwaitingApproval,
    /// The record must have been approved.
    RecordApproved,
    /// The document must be exactly PENDING.
    DocumentPending,
    /// The task set must be concluded.
    TasksConcluded,
    /// The document must be CREATED or INVALIDATED.
    DocumentDraft,
    /// The document must be SUBMITTED.
    DocumentSubmitted,
    /// The document must be UNDER_VALIDATION.
    DocumentUnderValidation,
    /// The document must be CREATED or UNDER_VALIDATION.
    DocumentInvalidatable,
}

impl Guard {
    /// Returns the guard name used in errors and audit events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingApproval => "awaiting_approval",
            Self::RecordApproved => "record_approved",
            Self::DocumentPending => "document_pending",
            Self::TasksConcluded => "tasks_concluded",
            Self::DocumentDraft => "document_draft",
            Self::DocumentSubmitted => "document_submitted",
            Self::DocumentUnderValidation => "document_under_validation",
            Self::DocumentInvalidatable => "document_invalidatable",
        }
    }
}

impl std::fmt::Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document states possible while sectors are attending tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftDocument {
    /// No draft yet.
    Pending,
    /// Draft created.
    Created,
}

/// Document states possible once the task group reached `SUBMIT_DRAFT`
/// but the draft has not been submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyDocument {
    /// No draft yet.
    Pending,
    /// Draft created.
    Created,
    /// Previously invalidated, awaiting resubmission.
    Invalidated,
}

/// Who is expected to act on a record next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponsibleActor {
    /// The sectors owning open tasks.
    #[serde(rename = "SECTORS")]
    Sectors,
    /// The logistics team.
    #[serde(rename = "LOGISTICS")]
    Logistics,
    /// Nobody; the record is finished.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ResponsibleActor {
    /// Returns the string representation used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sectors => "SECTORS",
            Self::Logistics => "LOGISTICS",
            Self::NotApplicable => "N/A",
        }
    }
}

impl std::fmt::Display for ResponsibleActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two axes of a workflow state, as stored and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowAxes {
    /// Task-group status.
    pub task_group: TaskGroupStatus,
    /// Document status.
    pub document: DocumentStatus,
}

/// The composite workflow state of a relocation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WorkflowAxes", into = "WorkflowAxes")]
pub enum WorkflowState {
    /// `(APPROVE_REQUEST, PENDING)`
    AwaitingApproval,
    /// `(REQUEST_REJECTED, PENDING)`, terminal.
    RequestRejected,
    /// `(ATTEND_TASKS, PENDING | CREATED)`
    AttendingTasks {
        /// Document status.
        document: DraftDocument,
    },
    /// `(SUBMIT_DRAFT, PENDING | CREATED | INVALIDATED)`
    DraftReady {
        /// Document status.
        document: ReadyDocument,
    },
    /// `(SUBMIT_DRAFT, SUBMITTED)`
    Submitted,
    /// `(RETURNED_FROM_DOCUMENT, UNDER_VALIDATION)`
    UnderValidation,
    /// `(REJECT_TASKS, INVALIDATED)`
    RemediatingTasks,
    /// `(REQUEST_COMPLETED, VALIDATED)`, terminal.
    Completed,
    /// `(CANCELLED, CANCELLED)`, terminal.
    Cancelled,
}

impl WorkflowState {
    /// The state a freshly opened record starts in.
    #[must_use]
    pub const fn initial(requires_approval: bool) -> Self {
        if requires_approval {
            Self::AwaitingApproval
        } else {
            Self::AttendingTasks {
                document: DraftDocument::Pending,
            }
        }
    }

    /// Builds a composite state from its two axes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ImpossibleWorkflowState` if the pair is not a
    /// reachable combination.
    pub const fn from_axes(
        task_group: TaskGroupStatus,
        document: DocumentStatus,
    ) -> Result<Self, DomainError> {
        use DocumentStatus as D;
        use TaskGroupStatus as T;

        match (task_group, document) {
            (T::ApproveRequest, D::Pending) => Ok(Self::AwaitingApproval),
            (T::RequestRejected, D::Pending) => Ok(Self::RequestRejected),
            (T::AttendTasks, D::Pending) => Ok(Self::AttendingTasks {
                document: DraftDocument::Pending,
            }),
            (T::AttendTasks, D::Created) => Ok(Self::AttendingTasks {
                document: DraftDocument::Created,
            }),
            (T::SubmitDraft, D::Pending) => Ok(Self::DraftReady {
                document: ReadyDocument::Pending,
            }),
            (T::SubmitDraft, D::Created) => Ok(Self::DraftReady {
                document: ReadyDocument::Created,
            }),
            (T::SubmitDraft, D::Invalidated) => Ok(Self::DraftReady {
                document: ReadyDocument::Invalidated,
            }),
            (T::SubmitDraft, D::Submitted) => Ok(Self::Submitted),
            (T::ReturnedFromDocument, D::UnderValidation) => Ok(Self::UnderValidation),
            (T::RejectTasks, D::Invalidated) => Ok(Self::RemediatingTasks),
            (T::RequestCompleted, D::Validated) => Ok(Self::Completed),
            (T::Cancelled, D::Cancelled) => Ok(Self::Cancelled),
            _ => Err(DomainError::ImpossibleWorkflowState {
                task_group,
                document,
            }),
        }
    }

    /// Returns the task-group axis.
    #[must_use]
    pub const fn task_group(&self) -> TaskGroupStatus {
        match self {
            Self::AwaitingApproval => TaskGroupStatus::ApproveRequest,
            Self::RequestRejected => TaskGroupStatus::RequestRejected,
            Self::AttendingTasks { .. } => TaskGroupStatus::AttendTasks,
            Self::DraftReady { .. } | Self::Submitted => TaskGroupStatus::SubmitDraft,
            Self::UnderValidation => TaskGroupStatus::ReturnedFromDocument,
            Self::RemediatingTasks => TaskGroupStatus::RejectTasks,
            Self::Completed => TaskGroupStatus::RequestCompleted,
            Self::Cancelled => TaskGroupStatus::Cancelled,
        }
    }

    /// Returns the document axis.
    #[must_use]
    pub const fn document(&self) -> DocumentStatus {
        match self {
            Self::AwaitingApproval
            | Self::RequestRejected
            | Self::AttendingTasks {
                document: DraftDocument::Pending,
            }
            | Self::DraftReady {
                document: ReadyDocument::Pending,
            } => DocumentStatus::Pending,
            Self::AttendingTasks {
                document: DraftDocument::Created,
            }
            | Self::DraftReady {
                document: ReadyDocument::Created,
            } => DocumentStatus::Created,
            Self::DraftReady {
                document: ReadyDocument::Invalidated,
            }
            | Self::RemediatingTasks => DocumentStatus::Invalidated,
            Self::Submitted => DocumentStatus::Submitted,
            Self::UnderValidation => DocumentStatus::UnderValidation,
            Self::Completed => DocumentStatus::Validated,
            Self::Cancelled => DocumentStatus::Cancelled,
        }
    }

    /// Returns both axes.
    #[must_use]
    pub const fn axes(&self) -> WorkflowAxes {
        WorkflowAxes {
            task_group: self.task_group(),
            document: self.document(),
        }
    }

    /// Returns true if the record accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::RequestRejected | Self::Completed | Self::Cancelled
        )
    }

    /// Fails with `TerminalState` if the record is terminal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TerminalState` for rejected, completed and
    /// cancelled records.
    pub fn ensure_not_terminal(&self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::TerminalState {
                entity: EntityKind::Record,
                state: self.task_group().as_str().to_string(),
            });
        }
        Ok(())
    }

    /// Who is expected to act on the record next.
    #[must_use]
    pub const fn responsible_actor(&self) -> ResponsibleActor {
        match self {
            Self::AttendingTasks { .. } => ResponsibleActor::Sectors,
            Self::Completed | Self::Cancelled => ResponsibleActor::NotApplicable,
            Self::AwaitingApproval
            | Self::RequestRejected
            | Self::DraftReady { .. }
            | Self::Submitted
            | Self::UnderValidation
            | Self::RemediatingTasks => ResponsibleActor::Logistics,
        }
    }

    /// The document statuses reachable from this state.
    #[must_use]
    pub fn document_targets(&self) -> Vec<DocumentStatus> {
        match self {
            Self::AwaitingApproval => vec![DocumentStatus::Cancelled],
            Self::AttendingTasks {
                document: DraftDocument::Pending,
            }
            | Self::DraftReady {
                document: ReadyDocument::Pending,
            } => vec![DocumentStatus::Created, DocumentStatus::Cancelled],
            Self::AttendingTasks {
                document: DraftDocument::Created,
            } => vec![DocumentStatus::Invalidated, DocumentStatus::Cancelled],
            Self::DraftReady {
                document: ReadyDocument::Created,
            } => vec![
                DocumentStatus::Submitted,
                DocumentStatus::Invalidated,
                DocumentStatus::Cancelled,
            ],
            Self::DraftReady {
                document: ReadyDocument::Invalidated,
            } => vec![DocumentStatus::Submitted, DocumentStatus::Cancelled],
            Self::RemediatingTasks => vec![DocumentStatus::Cancelled],
            Self::Submitted => vec![DocumentStatus::UnderValidation, DocumentStatus::Cancelled],
            Self::UnderValidation => vec![
                DocumentStatus::Validated,
                DocumentStatus::Invalidated,
                DocumentStatus::Cancelled,
            ],
            Self::RequestRejected | Self::Completed | Self::Cancelled => Vec::new(),
        }
    }

    const fn guard_error(&self, guard: Guard) -> DomainError {
        DomainError::GuardNotSatisfied {
            guard,
            task_group: self.task_group(),
            document: self.document(),
        }
    }

    /// Approves a record awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records and `GuardNotSatisfied`
    /// unless the record is awaiting approval.
    pub fn approve(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::AwaitingApproval => Ok(Self::AttendingTasks {
                document: DraftDocument::Pending,
            }),
            _ => Err(self.guard_error(Guard::AwaitingApproval)),
        }
    }

    /// Rejects a record awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records and `GuardNotSatisfied`
    /// unless the record is awaiting approval.
    pub fn reject(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::AwaitingApproval => Ok(Self::RequestRejected),
            _ => Err(self.guard_error(Guard::AwaitingApproval)),
        }
    }

    /// Creates the document draft.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records, `GuardNotSatisfied`
    /// with `RecordApproved` while awaiting approval, and with
    /// `DocumentPending` when a draft already exists.
    pub fn create_draft(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::AttendingTasks {
                document: DraftDocument::Pending,
            } => Ok(Self::AttendingTasks {
                document: DraftDocument::Created,
            }),
            Self::DraftReady {
                document: ReadyDocument::Pending,
            } => Ok(Self::DraftReady {
                document: ReadyDocument::Created,
            }),
            Self::AwaitingApproval => Err(self.guard_error(Guard::RecordApproved)),
            _ => Err(self.guard_error(Guard::DocumentPending)),
        }
    }

    /// Submits the draft once every task is concluded.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records, `GuardNotSatisfied`
    /// with `TasksConcluded` if the task group has not reached `SUBMIT_DRAFT`
    /// or the task set is not concluded, and with `DocumentDraft` if there is
    /// no draft to submit.
    pub fn submit_draft(self, tasks: &[Task]) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::DraftReady { document } => {
                if !tasks_concluded(tasks) {
                    return Err(self.guard_error(Guard::TasksConcluded));
                }
                match document {
                    ReadyDocument::Created | ReadyDocument::Invalidated => Ok(Self::Submitted),
                    ReadyDocument::Pending => Err(self.guard_error(Guard::DocumentDraft)),
                }
            }
            Self::Submitted | Self::UnderValidation => Err(self.guard_error(Guard::DocumentDraft)),
            _ => Err(self.guard_error(Guard::TasksConcluded)),
        }
    }

    /// Starts validation of a submitted document.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records and `GuardNotSatisfied`
    /// unless the document is submitted.
    pub fn begin_validation(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::Submitted => Ok(Self::UnderValidation),
            _ => Err(self.guard_error(Guard::DocumentSubmitted)),
        }
    }

    /// Validates the document, completing the record.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records and `GuardNotSatisfied`
    /// unless the document is under validation.
    pub fn validate(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::UnderValidation => Ok(Self::Completed),
            _ => Err(self.guard_error(Guard::DocumentUnderValidation)),
        }
    }

    /// Invalidates a created or under-validation document.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records and `GuardNotSatisfied`
    /// unless the document is CREATED or UNDER_VALIDATION.
    pub fn invalidate(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        match self {
            Self::AttendingTasks {
                document: DraftDocument::Created,
            }
            | Self::DraftReady {
                document: ReadyDocument::Created,
            }
            | Self::UnderValidation => Ok(Self::RemediatingTasks),
            _ => Err(self.guard_error(Guard::DocumentInvalidatable)),
        }
    }

    /// Cancels the record.
    ///
    /// # Errors
    ///
    /// Returns `TerminalState` for terminal records.
    pub fn cancel(self) -> Result<Self, DomainError> {
        self.ensure_not_terminal()?;
        Ok(Self::Cancelled)
    }

    /// Fails unless tasks may be created for the record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` when the document is submitted or validated or
    /// the record awaits approval, and `TerminalState` for other terminal
    /// records.
    pub fn ensure_accepts_new_tasks(&self) -> Result<(), DomainError> {
        let document: DocumentStatus = self.document();
        if matches!(
            document,
            DocumentStatus::Submitted | DocumentStatus::Validated
        ) {
            return Err(DomainError::InvalidState {
                entity: EntityKind::Record,
                reason: format!("tasks cannot be created while the document is {document}"),
            });
        }
        self.ensure_not_terminal()?;
        if matches!(self, Self::AwaitingApproval) {
            return Err(DomainError::InvalidState {
                entity: EntityKind::Record,
                reason: "tasks cannot be created before the request is approved".to_string(),
            });
        }
        Ok(())
    }

    /// Re-evaluates the task-group axis against the current task set.
    ///
    /// A concluded task set advances `ATTEND_TASKS` and `REJECT_TASKS` to
    /// `SUBMIT_DRAFT`; a task set that is no longer concluded moves
    /// `SUBMIT_DRAFT` back. Submitted, validating and terminal states are
    /// left untouched.
    #[must_use]
    pub fn reconcile_tasks(self, tasks: &[Task]) -> Self {
        let concluded: bool = tasks_concluded(tasks);
        match (self, concluded) {
            (Self::AttendingTasks { document }, true) => Self::DraftReady {
                document: match document {
                    DraftDocument::Pending => ReadyDocument::Pending,
                    DraftDocument::Created => ReadyDocument::Created,
                },
            },
            (Self::RemediatingTasks, true) => Self::DraftReady {
                document: ReadyDocument::Invalidated,
            },
            (Self::DraftReady { document }, false) => match document {
                ReadyDocument::Pending => Self::AttendingTasks {
                    document: DraftDocument::Pending,
                },
                ReadyDocument::Created => Self::AttendingTasks {
                    document: DraftDocument::Created,
                },
                ReadyDocument::Invalidated => Self::RemediatingTasks,
            },
            (state, _) => state,
        }
    }
}

impl TryFrom<WorkflowAxes> for WorkflowState {
    type Error = DomainError;

    fn try_from(axes: WorkflowAxes) -> Result<Self, Self::Error> {
        Self::from_axes(axes.task_group, axes.document)
    }
}

impl From<WorkflowState> for WorkflowAxes {
    fn from(state: WorkflowState) -> Self {
        state.axes()
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.task_group(), self.document())
    }
}
