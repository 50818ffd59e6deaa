use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::store::Store;
use crate::types::{ScheduleBlock, Task};

/// A schedule block together with the tasks resolved for one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledBlock {
    pub block: ScheduleBlock,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    #[serde(with = "crate::fields::weekday")]
    pub day: Weekday,
    pub blocks: Vec<ScheduledBlock>,
}

/// Tasks for one block: those it references by id, plus tasks due on `date`
/// whose `time_block` names the block. Priority DESC, then id ASC.
///
/// Referenced ids missing from `tasks` are skipped.
pub fn tasks_for_block(block: &ScheduleBlock, tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    let mut resolved: Vec<Task> = tasks
        .iter()
        .filter(|t| {
            block.task_ids.contains(&t.id)
                || (t.is_due_on(date) && t.time_block.as_deref() == Some(block.block_name.as_str()))
        })
        .cloned()
        .collect();
    resolved.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
    resolved
}

pub struct ScheduleService<'a> {
    store: &'a dyn Store,
}

impl<'a> ScheduleService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Blocks for one weekday ordered by start time
    pub fn blocks_for(&self, day: Weekday) -> Result<Vec<ScheduleBlock>> {
        let mut blocks: Vec<ScheduleBlock> = self
            .store
            .load_schedule()?
            .into_iter()
            .filter(|b| b.day == day)
            .collect();
        blocks.sort_by_key(|b| (b.start_time, b.block_id));
        Ok(blocks)
    }

    /// The schedule for the weekday of `date`, each block with its tasks.
    pub fn day_schedule(&self, date: NaiveDate) -> Result<DaySchedule> {
        let day = date.weekday();
        let tasks = self.store.load_tasks()?;

        let blocks: Vec<ScheduledBlock> = self
            .blocks_for(day)?
            .into_iter()
            .map(|block| {
                let tasks = tasks_for_block(&block, &tasks, date);
                ScheduledBlock { block, tasks }
            })
            .collect();

        debug!(date = %date, blocks = blocks.len(), "resolved day schedule");
        Ok(DaySchedule { date, day, blocks })
    }

    /// Block names mapped to how many blocks of the week carry that name
    pub fn block_names(&self) -> Result<HashMap<String, usize>> {
        let mut names = HashMap::new();
        for block in self.store.load_schedule()? {
            *names.entry(block.block_name).or_insert(0) += 1;
        }
        Ok(names)
    }
}
