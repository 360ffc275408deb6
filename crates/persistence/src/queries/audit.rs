// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use reloc_domain::{RecordId, RequestId};

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct AuditEventRow {
    event_id: i64,
    request_id: Option<i64>,
    record_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self {
            event_id: Some(row.event_id),
            actor,
            cause,
            action,
            before,
            after,
            request_id: row.request_id.map(RequestId::new),
            record_id: row.record_id.map(RecordId::new),
        })
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `NotFound` if the event does not exist, or an error if it cannot
/// be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Audit event {event_id}")))?
        .try_into()
}

/// Retrieves every audit event of one record in chronological order.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    record_id: RecordId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::record_id.eq(record_id.value()))
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEvent::try_from)
        .collect()
}

/// Retrieves the request-level events (those not scoped to a record).
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_request_audit_events(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::request_id.eq(request_id.value()))
        .filter(audit_events::record_id.is_null())
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEvent::try_from)
        .collect()
}
