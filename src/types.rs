use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::fields;
use crate::id::{BlockId, TaskId};

pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Pending or in progress
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `tasks.csv`. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: i32,
    pub status: TaskStatus,
    pub created_date: NaiveDate,
    pub due_date: NaiveDate,
    pub rollover_count: u32,
    /// Name of the schedule block this task belongs to
    pub time_block: Option<String>,
}

impl Task {
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == date
    }

    /// Pending and due on or before `today`
    pub fn needs_rollover(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::Pending && self.due_date <= today
    }
}

/// One row of `schedule.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub block_id: BlockId,
    #[serde(with = "fields::weekday")]
    pub day: Weekday,
    #[serde(with = "fields::hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "fields::hh_mm")]
    pub end_time: NaiveTime,
    pub block_name: String,
    pub block_type: String,
    #[serde(with = "fields::semicolon_ids")]
    pub task_ids: BTreeSet<TaskId>,
}

/// One row of `progress.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
    pub rolled_over_tasks: u32,
    pub productivity_score: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: i32,
    pub due_date: NaiveDate,
    pub time_block: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<i32>,
    pub due_date: Option<NaiveDate>,
    /// `Some(None)` clears the block
    pub time_block: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct ListTasksFilter {
    pub status: Option<TaskStatus>,
    pub due_on: Option<NaiveDate>,
    pub category: Option<String>,
    /// Open tasks due strictly before this date
    pub overdue_as_of: Option<NaiveDate>,
}

impl ListTasksFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(date) = self.due_on {
            if task.due_date != date {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !task.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(date) = self.overdue_as_of {
            if !(task.status.is_open() && task.due_date < date) {
                return false;
            }
        }
        true
    }
}
