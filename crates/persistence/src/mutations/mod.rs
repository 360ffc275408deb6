// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `audit`: audit event persistence
//! - `canonical`: employees and contracts
//! - `directory`: the employee directory used to apply transition effects
//! - `observations`: task observation writes
//! - `records`: orchestration (`persist_open_request`, `persist_transition`)
//!
//! Orchestration functions expect to run inside the caller's transaction.

pub mod audit;
pub mod canonical;
pub mod directory;
pub mod observations;
pub mod records;

pub use audit::persist_audit_event;
pub use canonical::{create_contract, create_employee};
pub use directory::SqliteDirectory;
pub use observations::{delete_observation, insert_observation, update_observation};
pub use records::{OpenedRequest, PersistTransitionResult, persist_open_request, persist_transition};
