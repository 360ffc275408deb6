// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Side effects on referenced employees.
//!
//! The engine never writes employees itself. Transitions return effect
//! descriptors and the caller applies them through an [`EmployeeDirectory`]
//! inside the same transaction that persists the new record state.

use reloc_domain::{ActivationState, EmployeeId};

/// A side effect on an employee produced by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Set the employee's activation state.
    SetActivationState {
        /// The employee.
        employee_id: EmployeeId,
        /// The new activation state.
        state: ActivationState,
    },
    /// Clear the employee's in-migration flag.
    ClearInMigration {
        /// The employee.
        employee_id: EmployeeId,
    },
    /// Clear the employee's active contract.
    ClearActiveContract {
        /// The employee.
        employee_id: EmployeeId,
    },
    /// Mark the employee as taking part in a relocation.
    MarkInMigration {
        /// The employee.
        employee_id: EmployeeId,
    },
}

/// Write access to the employees referenced by relocation records.
pub trait EmployeeDirectory {
    /// The error raised by the directory.
    type Error;

    /// Sets an employee's activation state.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee cannot be updated.
    fn set_activation_state(
        &mut self,
        employee_id: EmployeeId,
        state: ActivationState,
    ) -> Result<(), Self::Error>;

    /// Clears an employee's active contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee cannot be updated.
    fn clear_active_contract(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error>;

    /// Clears an employee's in-migration flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee cannot be updated.
    fn clear_in_migration(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error>;

    /// Sets an employee's in-migration flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee cannot be updated.
    fn mark_in_migration(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error>;
}

/// Applies effects in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the directory's error for the first effect that fails.
pub fn apply_effects<D>(directory: &mut D, effects: &[Effect]) -> Result<(), D::Error>
where
    D: EmployeeDirectory + ?Sized,
{
    for effect in effects {
        match *effect {
            Effect::SetActivationState { employee_id, state } => {
                directory.set_activation_state(employee_id, state)?;
            }
            Effect::ClearInMigration { employee_id } => {
                directory.clear_in_migration(employee_id)?;
            }
            Effect::ClearActiveContract { employee_id } => {
                directory.clear_active_contract(employee_id)?;
            }
            Effect::MarkInMigration { employee_id } => {
                directory.mark_in_migration(employee_id)?;
            }
        }
    }
    Ok(())
}
