use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::progress::percentage;
use crate::core::task_service::sort_tasks;
use crate::error::Result;
use crate::store::Store;
use crate::types::{Task, TaskStatus};

/// Summary of the tasks due on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub incomplete_tasks: usize,
    pub completion_rate: f64,
    pub categories: BTreeMap<String, usize>,
    pub priorities: BTreeMap<i32, usize>,
    pub incomplete: Vec<Task>,
}

pub fn build_report(tasks: &[Task], date: NaiveDate) -> DailyReport {
    let due: Vec<&Task> = tasks.iter().filter(|t| t.is_due_on(date)).collect();
    let completed = due
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();

    let mut categories = BTreeMap::new();
    let mut priorities = BTreeMap::new();
    for task in &due {
        *categories.entry(task.category.clone()).or_insert(0) += 1;
        *priorities.entry(task.priority).or_insert(0) += 1;
    }

    let mut incomplete: Vec<Task> = due
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .map(|t| (*t).clone())
        .collect();
    sort_tasks(&mut incomplete);

    DailyReport {
        date,
        total_tasks: due.len(),
        completed_tasks: completed,
        incomplete_tasks: due.len() - completed,
        completion_rate: percentage(completed as u64, (due.len() - completed) as u64),
        categories,
        priorities,
        incomplete,
    }
}

pub fn daily_report(store: &dyn Store, date: NaiveDate) -> Result<DailyReport> {
    Ok(build_report(&store.load_tasks()?, date))
}
