// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::task::Task;
use crate::task_status::TaskStatus;
use crate::types::Sector;
use serde::{Deserialize, Serialize};

/// Completion counts for one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorProgress {
    /// The sector.
    pub sector: Sector,
    /// Number of tasks owned by the sector, any status.
    pub total: usize,
    /// Number of `DONE` tasks.
    pub done: usize,
    /// `floor(done * 100 / total)`, 0 when there are no tasks.
    pub percent: usize,
}

impl SectorProgress {
    const fn from_counts(sector: Sector, total: usize, done: usize) -> Self {
        let percent: usize = if total == 0 { 0 } else { done * 100 / total };
        Self {
            sector,
            total,
            done,
            percent,
        }
    }
}

/// Derives per-sector completion counts from a task set.
///
/// One entry is returned for every sector, in reporting order, including
/// sectors without tasks.
#[must_use]
pub fn sector_progress(tasks: &[Task]) -> Vec<SectorProgress> {
    Sector::ALL
        .iter()
        .map(|sector| {
            let owned = tasks.iter().filter(|t| t.sector == *sector);
            let total: usize = owned.clone().count();
            let done: usize = owned.filter(|t| t.status == TaskStatus::Done).count();
            SectorProgress::from_counts(*sector, total, done)
        })
        .collect()
}
