// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Predefined task batches generated per sector.

use crate::task::NewTask;
use crate::types::{Priority, RequestType, Sector};

/// A catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardTask {
    /// Task type code.
    pub task_type: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Default priority.
    pub priority: Priority,
}

const DOCUMENT_CHECK: StandardTask = StandardTask {
    task_type: "DOCUMENT_CHECK",
    description: "Check the employee's personal documentation",
    priority: Priority::Medium,
};

const CONTRACT_UPDATE: StandardTask = StandardTask {
    task_type: "CONTRACT_UPDATE",
    description: "Update the employment contract for the destination",
    priority: Priority::High,
};

const TERMINATION_PAPERWORK: StandardTask = StandardTask {
    task_type: "TERMINATION_PAPERWORK",
    description: "Prepare the termination paperwork",
    priority: Priority::High,
};

const ASO: StandardTask = StandardTask {
    task_type: "ASO",
    description: "Occupational health exam for the new role",
    priority: Priority::High,
};

const DISMISSAL_EXAM: StandardTask = StandardTask {
    task_type: "DISMISSAL_EXAM",
    description: "Occupational dismissal exam",
    priority: Priority::High,
};

const MANDATORY_TRAINING: StandardTask = StandardTask {
    task_type: "MANDATORY_TRAINING",
    description: "Mandatory safety training for the destination contract",
    priority: Priority::Medium,
};

/// Returns the catalogue entries for a sector and request type.
#[must_use]
pub const fn standard_tasks(request_type: RequestType, sector: Sector) -> &'static [StandardTask] {
    match (sector, request_type) {
        (Sector::Hr, RequestType::Termination) => &[DOCUMENT_CHECK, TERMINATION_PAPERWORK],
        (Sector::Hr, RequestType::Allocation | RequestType::Transfer) => {
            &[DOCUMENT_CHECK, CONTRACT_UPDATE]
        }
        (Sector::Medicine, RequestType::Termination) => &[DISMISSAL_EXAM],
        (Sector::Medicine, RequestType::Allocation | RequestType::Transfer) => &[ASO],
        (Sector::Training, RequestType::Termination) => &[],
        (Sector::Training, RequestType::Allocation | RequestType::Transfer) => {
            &[MANDATORY_TRAINING]
        }
    }
}

/// Expands the catalogue for the given sectors into new tasks.
///
/// Sectors are expanded in the order given; duplicates are expanded once.
#[must_use]
pub fn standard_task_batch(request_type: RequestType, sectors: &[Sector]) -> Vec<NewTask> {
    let mut seen: Vec<Sector> = Vec::with_capacity(sectors.len());
    let mut batch: Vec<NewTask> = Vec::new();

    for sector in sectors {
        if seen.contains(sector) {
            continue;
        }
        seen.push(*sector);

        batch.extend(
            standard_tasks(request_type, *sector)
                .iter()
                .map(|entry| NewTask {
                    task_type: entry.task_type.to_string(),
                    description: entry.description.to_string(),
                    sector: *sector,
                    priority: entry.priority,
                    due_date: None,
                }),
        );
    }

    batch
}
