// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reloc::CoreError;
use reloc_domain::{DomainError, RecordId};
use reloc_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// public contract of the API. Internal details are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A workflow transition was attempted while its guard does not hold.
    #[error("Guard not satisfied: {guard} (task group: {task_group}, document: {document})")]
    GuardNotSatisfied {
        /// The unmet guard.
        guard: String,
        /// The record's task-group status.
        task_group: String,
        /// The record's document status.
        document: String,
    },
    /// The entity is terminal and accepts no further changes.
    #[error("{entity} is in terminal state {state}")]
    TerminalState {
        /// The entity kind.
        entity: String,
        /// The terminal status.
        state: String,
    },
    /// A structural rule blocks the operation in the current state.
    #[error("Invalid state for {entity}: {reason}")]
    InvalidState {
        /// The entity kind.
        entity: String,
        /// The blocking condition.
        reason: String,
    },
    /// The record changed between load and write, and retries were exhausted.
    #[error("Record {record_id} was modified concurrently (expected version {expected_version})")]
    ConcurrentModification {
        /// The contended record.
        record_id: RecordId,
        /// The version the rejected write was computed from.
        expected_version: i64,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::GuardNotSatisfied {
            guard,
            task_group,
            document,
        } => ApiError::GuardNotSatisfied {
            guard: guard.to_string(),
            task_group: task_group.to_string(),
            document: document.to_string(),
        },
        DomainError::TerminalState { entity, state } => ApiError::TerminalState {
            entity: entity.to_string(),
            state,
        },
        DomainError::InvalidState { entity, reason } => ApiError::InvalidState {
            entity: entity.to_string(),
            reason,
        },
        DomainError::TaskNotFound(task_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Task"),
            message: format!("Task {task_id} does not exist on this record"),
        },
        DomainError::ObservationNotFound(observation_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Observation"),
            message: format!("Observation {observation_id} does not exist"),
        },
        DomainError::EmployeeAlreadyInRelocation {
            employee_id,
            record_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("single_open_record"),
            message: format!(
                "Employee {employee_id} already has an open relocation record {record_id}"
            ),
        },
        DomainError::EmptyRequest => ApiError::InvalidInput {
            field: String::from("employees"),
            message: String::from("At least one employee is required"),
        },
        DomainError::DuplicateEmployee(employee_id) => ApiError::InvalidInput {
            field: String::from("employees"),
            message: format!("Employee {employee_id} is listed more than once"),
        },
        DomainError::InvalidTask(msg) => ApiError::InvalidInput {
            field: String::from("task"),
            message: msg,
        },
        DomainError::InvalidObservation(msg) => ApiError::InvalidInput {
            field: String::from("text"),
            message: msg,
        },
        DomainError::InvalidRequest(msg) => ApiError::InvalidInput {
            field: String::from("request"),
            message: msg,
        },
        DomainError::InvalidEmployee(msg) => ApiError::InvalidInput {
            field: String::from("employee"),
            message: msg,
        },
        DomainError::InvalidContract(msg) => ApiError::InvalidInput {
            field: String::from("contract"),
            message: msg,
        },
        DomainError::InvalidStatus { kind, value } => ApiError::InvalidInput {
            field: String::from(kind),
            message: format!("'{value}' is not a valid {kind}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::ImpossibleWorkflowState {
            task_group,
            document,
        } => {
            error!(%task_group, %document, "Stored record holds an impossible workflow state");
            ApiError::Internal {
                message: String::from("Stored record state is inconsistent"),
            }
        }
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Storage internals are logged and reported as `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type_of(&message),
            message,
        },
        PersistenceError::ConcurrentModification {
            record_id,
            expected_version,
        } => ApiError::ConcurrentModification {
            record_id,
            expected_version,
        },
        PersistenceError::EmployeeAlreadyInRelocation {
            employee_id,
            record_id,
        } => translate_domain_error(DomainError::EmployeeAlreadyInRelocation {
            employee_id,
            record_id,
        }),
        PersistenceError::ConstraintViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("referential_integrity"),
            message,
        },
        PersistenceError::ReconstructionError(message) => {
            error!(%message, "Failed to reconstruct stored data");
            ApiError::Internal {
                message: String::from("Stored data could not be read"),
            }
        }
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: String::from("Storage operation failed"),
            }
        }
    }
}

/// The leading word of a not-found message names the resource.
fn resource_type_of(message: &str) -> String {
    message
        .split_whitespace()
        .next()
        .filter(|word| word.chars().next().is_some_and(char::is_uppercase))
        .map_or_else(|| String::from("Resource"), String::from)
}
