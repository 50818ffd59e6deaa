//! Daily progress aggregation and the insights built on the progress log.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::store::Store;
use crate::types::{ProgressEntry, Task, TaskStatus};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / (part + rest) * 100`, rounded to 2 decimals; 0 when both are 0.
pub fn percentage(part: u64, rest: u64) -> f64 {
    let total = part.saturating_add(rest);
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}

/// Completed and pending counts for tasks due on one date.
///
/// In-progress tasks count toward neither side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyCounts {
    pub completed: u32,
    pub pending: u32,
}

impl DailyCounts {
    pub fn for_date(tasks: &[Task], date: NaiveDate) -> Self {
        let mut counts = Self::default();
        for task in tasks.iter().filter(|t| t.is_due_on(date)) {
            match task.status {
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => {}
            }
        }
        counts
    }

    pub fn productivity_score(&self) -> f64 {
        percentage(u64::from(self.completed), u64::from(self.pending))
    }

    pub fn into_entry(self, date: NaiveDate, rolled_over: u32, notes: String) -> ProgressEntry {
        ProgressEntry {
            date,
            completed_tasks: self.completed,
            pending_tasks: self.pending,
            rolled_over_tasks: rolled_over,
            productivity_score: self.productivity_score(),
            notes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub days_logged: usize,
    pub avg_productivity: f64,
    pub total_completed: u64,
    pub total_pending: u64,
    pub total_rolled_over: u64,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entries: Vec<ProgressEntry>,
    pub summary: InsightSummary,
}

pub struct ProgressService<'a> {
    store: &'a mut dyn Store,
}

impl<'a> ProgressService<'a> {
    pub fn new(store: &'a mut dyn Store) -> Self {
        Self { store }
    }

    /// Count today's tasks and append one row to the progress log.
    ///
    /// Calling this twice for the same day appends two rows.
    pub fn record(
        &mut self,
        today: NaiveDate,
        rolled_over: u32,
        notes: &str,
    ) -> Result<ProgressEntry> {
        let tasks = self.store.load_tasks()?;
        let entry =
            DailyCounts::for_date(&tasks, today).into_entry(today, rolled_over, notes.to_string());
        self.store.append_progress(&entry)?;

        info!(
            date = %today,
            completed = entry.completed_tasks,
            pending = entry.pending_tasks,
            score = entry.productivity_score,
            "progress recorded"
        );
        Ok(entry)
    }

    /// Every row of the progress log, in file order
    pub fn log(&self) -> Result<Vec<ProgressEntry>> {
        self.store.load_progress()
    }

    /// Progress rows dated within `[today - days, today]` plus their totals.
    pub fn insights(&self, today: NaiveDate, days: u32) -> Result<Insights> {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);

        let mut entries: Vec<ProgressEntry> = self
            .store
            .load_progress()?
            .into_iter()
            .filter(|e| e.date >= start && e.date <= today)
            .collect();
        entries.sort_by_key(|e| e.date);

        Ok(Insights {
            start,
            end: today,
            summary: summarize(&entries),
            entries,
        })
    }
}

pub fn summarize(entries: &[ProgressEntry]) -> InsightSummary {
    if entries.is_empty() {
        return InsightSummary::default();
    }

    let total_productivity: f64 = entries.iter().map(|e| e.productivity_score).sum();
    let total_completed = entries.iter().map(|e| u64::from(e.completed_tasks)).sum();
    let total_pending = entries.iter().map(|e| u64::from(e.pending_tasks)).sum();
    let total_rolled_over = entries.iter().map(|e| u64::from(e.rolled_over_tasks)).sum();

    InsightSummary {
        days_logged: entries.len(),
        avg_productivity: round2(total_productivity / entries.len() as f64),
        total_completed,
        total_pending,
        total_rolled_over,
        completion_rate: percentage(total_completed, total_pending),
    }
}
