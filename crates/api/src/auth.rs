// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stub authentication and role-based authorization.
//!
//! Real authentication is out of scope. Callers present an actor id and a
//! role; [`authenticate_stub`] only rejects empty ids. Authorization is
//! enforced before any command is evaluated.

use reloc::Command;
use reloc_audit::Actor;
use reloc_domain::Sector;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// System administrators. May do everything, including maintaining
    /// employees and contracts.
    Admin,
    /// The logistics team drives relocation requests and the document
    /// lifecycle, and may manage tasks of every sector.
    Logistics,
    /// A sector team (HR, medicine, training). May work only on its own
    /// sector's tasks and their observations.
    Sector(Sector),
}

impl Role {
    /// Returns the string representation used in headers and audit events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Logistics => "logistics",
            Self::Sector(Sector::Hr) => "hr",
            Self::Sector(Sector::Medicine) => "medicine",
            Self::Sector(Sector::Training) => "training",
        }
    }

    /// Parses a role name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for an unknown role.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "logistics" => Ok(Self::Logistics),
            "hr" => Ok(Self::Sector(Sector::Hr)),
            "medicine" => Ok(Self::Sector(Sector::Medicine)),
            "training" => Ok(Self::Sector(Sector::Training)),
            other => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(self.role.as_str()))
    }
}

/// Authenticates an actor without credentials.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only admins maintain employees and contracts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_manage_directory(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Logistics | Role::Sector(_) => Err(unauthorized(action, "Admin")),
        }
    }

    /// Opening requests and every record-level command belong to logistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a sector team.
    pub fn authorize_logistics(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Logistics => Ok(()),
            Role::Sector(_) => Err(unauthorized(action, "Logistics")),
        }
    }

    /// Checks a record-level command.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not drive the record workflow.
    pub fn authorize_record_command(
        actor: &AuthenticatedActor,
        command: &Command,
    ) -> Result<(), AuthError> {
        Self::authorize_logistics(actor, command.name())
    }

    /// Checks an operation on tasks of one sector.
    ///
    /// # Errors
    ///
    /// Returns an error if a sector team acts on another sector's task.
    pub fn authorize_sector(
        actor: &AuthenticatedActor,
        sector: Sector,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Logistics => Ok(()),
            Role::Sector(own) if own == sector => Ok(()),
            Role::Sector(_) => Err(unauthorized(
                action,
                &format!("Logistics or {sector} sector"),
            )),
        }
    }
}

fn unauthorized(action: &str, required_role: &str) -> AuthError {
    AuthError::Unauthorized {
        action: String::from(action),
        required_role: String::from(required_role),
    }
}
