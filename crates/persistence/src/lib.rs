// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the relocation workflow engine.
//!
//! This crate stores requests, records, tasks, observations, employees,
//! contracts and audit events in `SQLite` through Diesel.
//!
//! ## Transactions and versioning
//!
//! Every record carries a monotonically increasing `version`. Persisting a
//! transition runs inside one `BEGIN IMMEDIATE` transaction that
//!
//! 1. bumps the version with `... WHERE record_id = ? AND version = ?`,
//! 2. deletes, updates and inserts the record's tasks,
//! 3. applies the transition's employee effects,
//! 4. appends the audit event.
//!
//! Zero affected rows in step 1 yields `ConcurrentModification` and nothing
//! is written. Any other failure rolls the whole transaction back as well.
//!
//! ## Testing
//!
//! Tests use unique shared in-memory databases (see [`Persistence::new_in_memory`]).

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use reloc::{OpenRequestResult, RecordState, TransitionResult};
use reloc_audit::AuditEvent;
use reloc_domain::{
    Contract, ContractId, Employee, EmployeeId, Observation, ObservationId, RecordId,
    RelocationRecord, RelocationRequest, RequestId, TaskId,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::EXPECTED_TABLES;
pub use error::PersistenceError;
pub use mutations::{OpenedRequest, PersistTransitionResult, SqliteDirectory};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own shared-cache database, so tests never see
    /// each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:reloc_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled on this connection.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Verifies that the migrated schema contains every expected table.
    ///
    /// # Errors
    ///
    /// Returns `MigrationFailed` if a table is missing.
    pub fn verify_schema(&mut self) -> Result<(), PersistenceError> {
        backend::verify_expected_tables(&mut self.conn)
    }

    // ========================================================================
    // Employees and contracts
    // ========================================================================

    /// Creates a contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the insert fails.
    pub fn create_contract(&mut self, contract: &Contract) -> Result<ContractId, PersistenceError> {
        mutations::create_contract(&mut self.conn, contract)
    }

    /// Retrieves a contract.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the contract does not exist.
    pub fn get_contract(&mut self, contract_id: ContractId) -> Result<Contract, PersistenceError> {
        queries::get_contract(&mut self.conn, contract_id)
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration is taken, the active contract
    /// does not exist or the insert fails.
    pub fn create_employee(&mut self, employee: &Employee) -> Result<EmployeeId, PersistenceError> {
        mutations::create_employee(&mut self.conn, employee)
    }

    /// Retrieves an employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub fn get_employee(&mut self, employee_id: EmployeeId) -> Result<Employee, PersistenceError> {
        queries::get_employee(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Requests and records
    // ========================================================================

    /// Lists the open records held by any of the given employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_open_records_for(
        &mut self,
        employee_ids: &[EmployeeId],
    ) -> Result<Vec<(EmployeeId, RecordId)>, PersistenceError> {
        queries::list_open_records_for(&mut self.conn, employee_ids)
    }

    /// Persists an opened request atomically.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeAlreadyInRelocation` if an employee gained an open
    /// record in the meantime; nothing is written in that case.
    pub fn persist_open_request(
        &mut self,
        result: &OpenRequestResult,
        now: OffsetDateTime,
    ) -> Result<OpenedRequest, PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::persist_open_request(conn, result, now))
    }

    /// Retrieves a request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist.
    pub fn get_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<RelocationRequest, PersistenceError> {
        queries::get_request(&mut self.conn, request_id)
    }

    /// Lists the records of a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_records_for_request(
        &mut self,
        request_id: RequestId,
    ) -> Result<Vec<RelocationRecord>, PersistenceError> {
        queries::list_records_for_request(&mut self.conn, request_id)
    }

    /// Loads a record with its request type and tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist.
    pub fn load_record_state(
        &mut self,
        record_id: RecordId,
    ) -> Result<RecordState, PersistenceError> {
        queries::load_record_state(&mut self.conn, record_id)
    }

    /// Persists a transition result atomically, guarded by the record version.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition to persist
    /// * `expected_version` - The version the transition was computed from
    ///
    /// # Errors
    ///
    /// Returns `ConcurrentModification` if the record changed since it was
    /// loaded. On any error nothing is written.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
        expected_version: i64,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            mutations::persist_transition(conn, result, expected_version)
        })
    }

    /// Returns the record owning a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the task does not exist.
    pub fn get_task_record_id(&mut self, task_id: TaskId) -> Result<RecordId, PersistenceError> {
        queries::get_task_record_id(&mut self.conn, task_id)
    }

    // ========================================================================
    // Observations
    // ========================================================================

    /// Appends an observation.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist or the insert fails.
    pub fn add_observation(
        &mut self,
        observation: &Observation,
    ) -> Result<ObservationId, PersistenceError> {
        mutations::insert_observation(&mut self.conn, observation)
    }

    /// Writes an edited observation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the observation does not exist.
    pub fn update_observation(
        &mut self,
        observation: &Observation,
    ) -> Result<(), PersistenceError> {
        mutations::update_observation(&mut self.conn, observation)
    }

    /// Deletes an observation, reporting whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_observation(
        &mut self,
        observation_id: ObservationId,
    ) -> Result<bool, PersistenceError> {
        mutations::delete_observation(&mut self.conn, observation_id)
    }

    /// Retrieves an observation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the observation does not exist.
    pub fn get_observation(
        &mut self,
        observation_id: ObservationId,
    ) -> Result<Observation, PersistenceError> {
        queries::get_observation(&mut self.conn, observation_id)
    }

    /// Lists a task's observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_observations(
        &mut self,
        task_id: TaskId,
    ) -> Result<Vec<Observation>, PersistenceError> {
        queries::list_observations(&mut self.conn, task_id)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Retrieves an audit event.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the event does not exist.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves a record's audit timeline, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        record_id: RecordId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, record_id)
    }

    /// Retrieves the request-level audit events of a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_request_audit_events(
        &mut self,
        request_id: RequestId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_request_audit_events(&mut self.conn, request_id)
    }
}
