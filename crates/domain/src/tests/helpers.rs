// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewTask, Priority, RecordId, Sector, Task, TaskId, TaskStatus};
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

pub fn new_task(sector: Sector) -> NewTask {
    NewTask {
        task_type: String::from("ASO"),
        description: String::from("Occupational health exam"),
        sector,
        priority: Priority::Medium,
        due_date: None,
    }
}

/// Builds a persisted-looking task with the given status.
pub fn task_with_status(id: i64, sector: Sector, status: TaskStatus) -> Task {
    let mut task: Task = Task::new(RecordId::new(1), new_task(sector), NOW);
    task.task_id = Some(TaskId::new(id));
    task.status = status;
    task
}
