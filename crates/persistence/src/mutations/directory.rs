// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee writes driven by transition effects.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc::EmployeeDirectory;
use reloc_domain::{ActivationState, EmployeeId};
use tracing::debug;

use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// An [`EmployeeDirectory`] backed by the connection of an open transaction.
pub struct SqliteDirectory<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteDirectory<'a> {
    /// Wraps a connection. Effects are only atomic with the transition when
    /// the connection is inside the transaction that persists it.
    pub const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

fn ensure_updated(affected: usize, employee_id: EmployeeId) -> Result<(), PersistenceError> {
    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("Employee {employee_id}")));
    }
    Ok(())
}

impl EmployeeDirectory for SqliteDirectory<'_> {
    type Error = PersistenceError;

    fn set_activation_state(
        &mut self,
        employee_id: EmployeeId,
        state: ActivationState,
    ) -> Result<(), Self::Error> {
        let affected: usize = diesel::update(
            employees::table.filter(employees::employee_id.eq(employee_id.value())),
        )
        .set(employees::activation.eq(state.as_str()))
        .execute(self.conn)?;
        debug!(employee_id = employee_id.value(), %state, "Set activation state");
        ensure_updated(affected, employee_id)
    }

    fn clear_active_contract(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        let affected: usize = diesel::update(
            employees::table.filter(employees::employee_id.eq(employee_id.value())),
        )
        .set(employees::active_contract_id.eq(None::<i64>))
        .execute(self.conn)?;
        debug!(employee_id = employee_id.value(), "Cleared active contract");
        ensure_updated(affected, employee_id)
    }

    fn clear_in_migration(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        let affected: usize = diesel::update(
            employees::table.filter(employees::employee_id.eq(employee_id.value())),
        )
        .set(employees::in_migration.eq(0))
        .execute(self.conn)?;
        debug!(employee_id = employee_id.value(), "Cleared in-migration flag");
        ensure_updated(affected, employee_id)
    }

    fn mark_in_migration(&mut self, employee_id: EmployeeId) -> Result<(), Self::Error> {
        let affected: usize = diesel::update(
            employees::table.filter(employees::employee_id.eq(employee_id.value())),
        )
        .set(employees::in_migration.eq(1))
        .execute(self.conn)?;
        debug!(employee_id = employee_id.value(), "Marked in migration");
        ensure_updated(affected, employee_id)
    }
}
