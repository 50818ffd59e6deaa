//! Carrying pending, past-due tasks forward one day.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::progress::DailyCounts;
use crate::error::Result;
use crate::id::TaskId;
use crate::store::Store;
use crate::types::{ProgressEntry, Task};

/// Advance every pending task due on or before `today` by exactly one day
/// and bump its rollover count. Returns the ids that moved, in table order.
///
/// Each task is visited once, so nothing moves twice in one call no matter
/// how overdue it is.
pub fn rollover_tasks(tasks: &mut [Task], today: NaiveDate) -> Vec<TaskId> {
    let mut migrated = Vec::new();
    for task in tasks.iter_mut() {
        if !task.needs_rollover(today) {
            continue;
        }
        // a task at NaiveDate::MAX or at the counter limit stays where it is
        let (Some(next), Some(count)) = (
            task.due_date.checked_add_days(Days::new(1)),
            task.rollover_count.checked_add(1),
        ) else {
            warn!(task_id = %task.id, "task cannot be rolled over any further");
            continue;
        };
        task.due_date = next;
        task.rollover_count = count;
        migrated.push(task.id);
    }
    migrated
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverReport {
    pub date: NaiveDate,
    pub migrated: usize,
    pub task_ids: Vec<TaskId>,
    /// Row appended to the progress log, if logging was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressEntry>,
}

/// End-of-day job: snapshot today's counts, roll tasks over, rewrite the
/// task table and optionally append a progress row carrying the migrated
/// count.
pub fn run(
    store: &mut dyn Store,
    today: NaiveDate,
    log_progress: bool,
) -> Result<RolloverReport> {
    let mut tasks = store.load_tasks()?;
    let counts = DailyCounts::for_date(&tasks, today);

    let task_ids = rollover_tasks(&mut tasks, today);
    store.save_tasks(&tasks)?;

    let progress = if log_progress {
        let entry = counts.into_entry(today, task_ids.len() as u32, String::new());
        store.append_progress(&entry)?;
        Some(entry)
    } else {
        None
    };

    info!(date = %today, migrated = task_ids.len(), "rollover complete");
    Ok(RolloverReport {
        date: today,
        migrated: task_ids.len(),
        task_ids,
        progress,
    })
}
