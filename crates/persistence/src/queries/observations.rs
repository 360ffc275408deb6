// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task observation queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reloc_domain::{Observation, ObservationId, TaskId};

use crate::data_models::ObservationRow;
use crate::diesel_schema::task_observations;
use crate::error::PersistenceError;

/// Retrieves an observation by ID.
///
/// # Errors
///
/// Returns `NotFound` if the observation does not exist.
pub fn get_observation(
    conn: &mut SqliteConnection,
    observation_id: ObservationId,
) -> Result<Observation, PersistenceError> {
    task_observations::table
        .filter(task_observations::observation_id.eq(observation_id.value()))
        .select(ObservationRow::as_select())
        .first::<ObservationRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Observation {observation_id}")))?
        .try_into()
}

/// Lists a task's observations, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_observations(
    conn: &mut SqliteConnection,
    task_id: TaskId,
) -> Result<Vec<Observation>, PersistenceError> {
    task_observations::table
        .filter(task_observations::task_id.eq(task_id.value()))
        .select(ObservationRow::as_select())
        .order(task_observations::observation_id.asc())
        .load::<ObservationRow>(conn)?
        .into_iter()
        .map(Observation::try_from)
        .collect()
}
