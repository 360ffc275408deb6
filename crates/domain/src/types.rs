// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::workflow::WorkflowState;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Declares a canonical numeric identifier assigned by the database.
macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

canonical_id!(
    /// Identifier of a relocation request.
    RequestId
);
canonical_id!(
    /// Identifier of a relocation record.
    RecordId
);
canonical_id!(
    /// Identifier of a task.
    TaskId
);
canonical_id!(
    /// Identifier of a task observation.
    ObservationId
);
canonical_id!(
    /// Identifier of an employee.
    EmployeeId
);
canonical_id!(
    /// Identifier of a contract.
    ContractId
);

/// The kind of movement a relocation request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Allocation of an employee (possibly a new hire) onto a contract.
    Allocation,
    /// Transfer of an employee between contracts.
    Transfer,
    /// Termination: the employee leaves the active workforce.
    Termination,
}

impl RequestType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Allocation => "ALLOCATION",
            Self::Transfer => "TRANSFER",
            Self::Termination => "TERMINATION",
        }
    }

    /// The activation state an employee ends in once the document is validated.
    #[must_use]
    pub const fn resulting_activation(&self) -> ActivationState {
        match self {
            Self::Termination => ActivationState::Inactive,
            Self::Allocation | Self::Transfer => ActivationState::Active,
        }
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLOCATION" => Ok(Self::Allocation),
            "TRANSFER" => Ok(Self::Transfer),
            "TERMINATION" => Ok(Self::Termination),
            _ => Err(DomainError::InvalidStatus {
                kind: "request type",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Organizational unit responsible for a subset of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sector {
    /// Human resources.
    Hr,
    /// Occupational medicine.
    Medicine,
    /// Training.
    Training,
}

impl Sector {
    /// All sectors in reporting order.
    pub const ALL: [Self; 3] = [Self::Hr, Self::Medicine, Self::Training];

    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::Medicine => "MEDICINE",
            Self::Training => "TRAINING",
        }
    }

    /// Whether tasks of this sector may carry a due-date extension.
    #[must_use]
    pub const fn allows_due_date_extension(&self) -> bool {
        matches!(self, Self::Medicine | Self::Training)
    }
}

impl FromStr for Sector {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HR" => Ok(Self::Hr),
            "MEDICINE" => Ok(Self::Medicine),
            "TRAINING" => Ok(Self::Training),
            _ => Err(DomainError::InvalidStatus {
                kind: "sector",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(DomainError::InvalidStatus {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an employee is part of the active workforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationState {
    /// Active employee.
    Active,
    /// Inactive employee.
    Inactive,
}

impl ActivationState {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl FromStr for ActivationState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus {
                kind: "activation state",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ActivationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An employee as seen by the relocation workflow.
///
/// The employee lifecycle is owned elsewhere; the workflow only writes the
/// activation state, the in-migration flag and the active contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical identifier, `None` until persisted.
    pub employee_id: Option<EmployeeId>,
    /// Full name.
    pub name: String,
    /// Company registration number.
    pub registration: String,
    /// Current activation state.
    pub activation: ActivationState,
    /// Whether the employee currently takes part in a relocation.
    pub in_migration: bool,
    /// The contract the employee is currently assigned to.
    pub active_contract: Option<ContractId>,
}

impl Employee {
    /// Creates a new, not yet persisted, employee.
    #[must_use]
    pub const fn new(
        name: String,
        registration: String,
        activation: ActivationState,
        active_contract: Option<ContractId>,
    ) -> Self {
        Self {
            employee_id: None,
            name,
            registration,
            activation,
            in_migration: false,
            active_contract,
        }
    }
}

/// A contract employees are allocated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Canonical identifier, `None` until persisted.
    pub contract_id: Option<ContractId>,
    /// Short contract code.
    pub code: String,
    /// Descriptive name.
    pub name: String,
}

/// A relocation request grouping one or more relocation records.
///
/// The request has no stored lifecycle status; see [`crate::rollup_request_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationRequest {
    /// Canonical identifier, `None` until persisted.
    pub request_id: Option<RequestId>,
    /// The kind of movement.
    pub request_type: RequestType,
    /// Origin contract; `None` means a new hire.
    pub origin_contract: Option<ContractId>,
    /// Destination contract.
    pub destination_contract: Option<ContractId>,
    /// Who asked for the relocation.
    pub requested_by: String,
    /// Why the relocation is needed.
    pub justification: String,
    /// When the relocation was requested.
    pub requested_on: Date,
    /// Whether records start awaiting an explicit approval.
    pub requires_approval: bool,
}

impl RelocationRequest {
    /// Whether the request brings a new hire into the workforce.
    #[must_use]
    pub const fn is_new_hire(&self) -> bool {
        self.origin_contract.is_none()
    }
}

/// One employee's participation in a relocation request.
///
/// This is the unit of workflow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationRecord {
    /// Canonical identifier, `None` until persisted.
    pub record_id: Option<RecordId>,
    /// The owning request.
    pub request_id: RequestId,
    /// The relocated employee.
    pub employee_id: EmployeeId,
    /// Composite workflow state (task-group and document axes).
    pub state: WorkflowState,
    /// Free-text observation attached to the document.
    pub document_observation: Option<String>,
    /// Optimistic concurrency token, incremented on every persisted transition.
    pub version: i64,
    /// When the record was last changed.
    pub updated_at: OffsetDateTime,
}

impl RelocationRecord {
    /// Creates the initial record for an employee within a request.
    #[must_use]
    pub const fn new(
        request_id: RequestId,
        employee_id: EmployeeId,
        requires_approval: bool,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            record_id: None,
            request_id,
            employee_id,
            state: WorkflowState::initial(requires_approval),
            document_observation: None,
            version: 0,
            updated_at: created_at,
        }
    }
}
