// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `audit`: audit events and per-record timelines
//! - `canonical`: employees, contracts and requests
//! - `records`: relocation records, their tasks and full record state
//! - `observations`: task observations

pub mod audit;
pub mod canonical;
pub mod observations;
pub mod records;

pub use audit::{get_audit_event, get_audit_timeline, get_request_audit_events};
pub use canonical::{get_contract, get_employee, get_request, list_open_records_for};
pub use observations::{get_observation, list_observations};
pub use records::{
    get_record, get_task_record_id, list_records_for_request, list_tasks_for_record,
    load_record_state,
};
