// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task observation writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc_domain::{Observation, ObservationId};
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{NewObservationRow, format_timestamp};
use crate::diesel_schema::task_observations;
use crate::error::PersistenceError;

/// Appends an observation to its task.
///
/// # Errors
///
/// Returns `ConstraintViolation` if the task does not exist.
pub fn insert_observation(
    conn: &mut SqliteConnection,
    observation: &Observation,
) -> Result<ObservationId, PersistenceError> {
    diesel::insert_into(task_observations::table)
        .values(NewObservationRow {
            task_id: observation.task_id.value(),
            text: &observation.text,
            author: &observation.author,
            created_at: format_timestamp(observation.created_at)?,
        })
        .execute(conn)?;

    let observation_id: ObservationId = ObservationId::new(get_last_insert_rowid(conn)?);
    debug!(
        observation_id = observation_id.value(),
        task_id = observation.task_id.value(),
        "Added observation"
    );
    Ok(observation_id)
}

/// Writes an edited observation's text and modifier.
///
/// The author and creation timestamp are never rewritten.
///
/// # Errors
///
/// Returns `NotFound` if the observation has no ID or no longer exists.
pub fn update_observation(
    conn: &mut SqliteConnection,
    observation: &Observation,
) -> Result<(), PersistenceError> {
    let observation_id: ObservationId = observation
        .observation_id
        .ok_or_else(|| PersistenceError::NotFound(String::from("Unsaved observation")))?;
    let modified_at: Option<String> = observation.modified_at.map(format_timestamp).transpose()?;

    let affected: usize = diesel::update(
        task_observations::table
            .filter(task_observations::observation_id.eq(observation_id.value())),
    )
    .set((
        task_observations::text.eq(&observation.text),
        task_observations::modified_by.eq(observation.modified_by.as_deref()),
        task_observations::modified_at.eq(modified_at),
    ))
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Observation {observation_id}"
        )));
    }
    Ok(())
}

/// Hard-deletes an observation.
///
/// # Returns
///
/// `true` if a row was removed, `false` if the ID was already absent.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_observation(
    conn: &mut SqliteConnection,
    observation_id: ObservationId,
) -> Result<bool, PersistenceError> {
    let affected: usize = diesel::delete(
        task_observations::table
            .filter(task_observations::observation_id.eq(observation_id.value())),
    )
    .execute(conn)?;
    Ok(affected > 0)
}
