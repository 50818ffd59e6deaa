use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tracing::warn;

use crate::core::{ScheduleService, TaskService};
use crate::error::Result;
use crate::id::TaskId;
use crate::store::Store;
use crate::types::{CreateTaskInput, ListTasksFilter, Task, TaskStatus, UpdateTaskInput};

/// Parse TaskId from CLI string
pub fn parse_task_id(s: &str) -> std::result::Result<TaskId, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Parse a YYYY-MM-DD date from CLI string
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    crate::fields::parse_date(s).map_err(|e| format!("{e}"))
}

#[derive(Subcommand, Clone)]
pub enum TaskCommand {
    /// Add a pending task (id = highest existing id + 1)
    Add(AddArgs),
    Get {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
    List(ListArgs),
    /// List tasks that are pending or in progress
    Pending,
    Update(UpdateArgs),
    /// Set a task's status (completing resets its rollover count)
    Status(StatusArgs),
    /// Mark a task in progress
    Start {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
    /// Mark a task completed
    Complete {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
    Delete {
        #[arg(value_parser = parse_task_id)]
        id: TaskId,
    },
    Search(SearchArgs),
}

#[derive(Args, Clone)]
pub struct AddArgs {
    #[arg(short = 't', long)]
    pub title: String,

    #[arg(short = 'd', long, default_value = "")]
    pub description: String,

    #[arg(short = 'c', long, default_value = "general")]
    pub category: String,

    /// 1 (low) to 5 (high)
    #[arg(short = 'p', long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub priority: i32,

    /// Due date (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    /// Schedule block name, e.g. "Core Learning Sessions"
    #[arg(short = 'b', long)]
    pub block: Option<String>,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    #[arg(long, value_enum)]
    pub status: Option<TaskStatus>,

    /// Only tasks due on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, conflicts_with = "overdue")]
    pub due: Option<NaiveDate>,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Only open tasks due before today
    #[arg(long)]
    pub overdue: bool,
}

#[derive(Args, Clone)]
pub struct UpdateArgs {
    #[arg(value_parser = parse_task_id)]
    pub id: TaskId,

    #[arg(short = 't', long)]
    pub title: Option<String>,

    #[arg(short = 'd', long)]
    pub description: Option<String>,

    #[arg(short = 'c', long)]
    pub category: Option<String>,

    #[arg(short = 'p', long, value_parser = clap::value_parser!(i32).range(1..=5))]
    pub priority: Option<i32>,

    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    #[arg(short = 'b', long, conflicts_with = "clear_block")]
    pub block: Option<String>,

    /// Detach the task from its schedule block
    #[arg(long)]
    pub clear_block: bool,
}

#[derive(Args, Clone)]
pub struct StatusArgs {
    #[arg(value_parser = parse_task_id)]
    pub id: TaskId,

    #[arg(value_enum)]
    pub status: TaskStatus,
}

#[derive(Args, Clone)]
pub struct SearchArgs {
    pub query: String,
}

pub enum TaskResult {
    One(Task),
    Many(Vec<Task>),
    Deleted,
}

/// Warn when a task points at a block name the schedule does not have.
fn check_block_name(store: &dyn Store, block: Option<&str>) -> Result<()> {
    let Some(name) = block else {
        return Ok(());
    };
    let names = ScheduleService::new(store).block_names()?;
    if !names.contains_key(name) {
        warn!(block = name, "time block not found in schedule");
    }
    Ok(())
}

pub fn handle(store: &mut dyn Store, cmd: TaskCommand, today: NaiveDate) -> Result<TaskResult> {
    match cmd {
        TaskCommand::Add(args) => {
            check_block_name(store, args.block.as_deref())?;
            let input = CreateTaskInput {
                title: args.title,
                description: args.description,
                category: args.category,
                priority: args.priority,
                due_date: args.due.unwrap_or(today),
                time_block: args.block,
            };
            Ok(TaskResult::One(TaskService::new(store).add(&input, today)?))
        }

        TaskCommand::Get { id } => Ok(TaskResult::One(TaskService::new(store).get(id)?)),

        TaskCommand::List(args) => {
            let filter = ListTasksFilter {
                status: args.status,
                due_on: args.due,
                category: args.category,
                overdue_as_of: if args.overdue { Some(today) } else { None },
            };
            Ok(TaskResult::Many(TaskService::new(store).list(&filter)?))
        }

        TaskCommand::Pending => Ok(TaskResult::Many(TaskService::new(store).pending()?)),

        TaskCommand::Update(args) => {
            check_block_name(store, args.block.as_deref())?;
            let time_block = if args.clear_block {
                Some(None)
            } else {
                args.block.map(Some)
            };
            let input = UpdateTaskInput {
                title: args.title,
                description: args.description,
                category: args.category,
                priority: args.priority,
                due_date: args.due,
                time_block,
            };
            Ok(TaskResult::One(
                TaskService::new(store).update(args.id, &input)?,
            ))
        }

        TaskCommand::Status(args) => Ok(TaskResult::One(
            TaskService::new(store).set_status(args.id, args.status)?,
        )),

        TaskCommand::Start { id } => Ok(TaskResult::One(
            TaskService::new(store).set_status(id, TaskStatus::InProgress)?,
        )),

        TaskCommand::Complete { id } => Ok(TaskResult::One(
            TaskService::new(store).set_status(id, TaskStatus::Completed)?,
        )),

        TaskCommand::Delete { id } => {
            TaskService::new(store).delete(id)?;
            Ok(TaskResult::Deleted)
        }

        TaskCommand::Search(args) => Ok(TaskResult::Many(
            TaskService::new(store).search(&args.query)?,
        )),
    }
}
