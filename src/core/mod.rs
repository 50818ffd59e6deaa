pub mod progress;
pub mod report;
pub mod rollover;
pub mod schedule;
pub mod task_service;

pub use progress::{DailyCounts, Insights, ProgressService};
pub use report::{daily_report, DailyReport};
pub use rollover::{rollover_tasks, RolloverReport};
pub use schedule::{DaySchedule, ScheduleService};
pub use task_service::TaskService;
