use thiserror::Error;

use crate::id::{IdParseError, TaskId};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Task with ID {0} not found")]
    TaskNotFound(TaskId),

    #[error("No task IDs left (highest is {})", u32::MAX)]
    IdsExhausted,

    #[error("Invalid priority: {0} (must be 1-5)")]
    InvalidPriority(i32),

    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error(transparent)]
    InvalidId(#[from] IdParseError),

    /// Header row does not match the expected column layout
    #[error("{file}: unexpected header row (expected: {expected})")]
    MissingHeader { file: String, expected: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
