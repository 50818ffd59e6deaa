pub mod data;
pub mod progress;
pub mod schedule;
pub mod task;

pub use data::{DataCommand, DataResult};
pub use progress::{ProgressCommand, ProgressResult, ReportArgs, RolloverArgs};
pub use schedule::{ScheduleCommand, ScheduleResult};
pub use task::{TaskCommand, TaskResult};
