use std::io::IsTerminal;

use owo_colors::{OwoColorize, Style};

use dayplan::commands::{DataCommand, ProgressCommand, ScheduleCommand, TaskCommand};
use dayplan::core::{DailyReport, DaySchedule, Insights, RolloverReport};
use dayplan::fields::{weekday_name, TIME_FORMAT};
use dayplan::types::{ProgressEntry, ScheduleBlock, Task, TaskStatus};

use crate::Command;

/// Color policy: --no-color > NO_COLOR env > TERM=dumb > !isatty > default (color)
fn should_use_color_for(no_color_flag: bool, is_tty: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("TERM").ok().as_deref() == Some("dumb") {
        return false;
    }
    is_tty
}

fn should_use_color(no_color_flag: bool) -> bool {
    should_use_color_for(no_color_flag, std::io::stdout().is_terminal())
}

fn should_use_color_stderr(no_color_flag: bool) -> bool {
    should_use_color_for(no_color_flag, std::io::stderr().is_terminal())
}

/// Color scheme for output
struct Colors {
    task_id: Style,
    completed: Style,
    in_progress: Style,
    pending: Style,
    rolled: Style,
    priority_high: Style,
    priority_med: Style,
    heading: Style,
    dim: Style,
    error: Style,
}

impl Colors {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                task_id: Style::new().cyan().dimmed(),
                completed: Style::new().green(),
                in_progress: Style::new().yellow(),
                pending: Style::new(),
                rolled: Style::new().magenta(),
                priority_high: Style::new().red(),
                priority_med: Style::new().yellow(),
                heading: Style::new().bold(),
                dim: Style::new().dimmed(),
                error: Style::new().red().bold(),
            }
        } else {
            // No-op styles when color disabled
            Self {
                task_id: Style::new(),
                completed: Style::new(),
                in_progress: Style::new(),
                pending: Style::new(),
                rolled: Style::new(),
                priority_high: Style::new(),
                priority_med: Style::new(),
                heading: Style::new(),
                dim: Style::new(),
                error: Style::new(),
            }
        }
    }
}

/// Handles human-readable CLI output.
pub struct Printer {
    colors: Colors,
}

impl Printer {
    /// Create printer for stdout (standard output)
    pub fn new(no_color_flag: bool) -> Self {
        let use_color = should_use_color(no_color_flag);
        Self {
            colors: Colors::new(use_color),
        }
    }

    /// Create printer for stderr (error output)
    pub fn new_for_stderr(no_color_flag: bool) -> Self {
        let use_color = should_use_color_stderr(no_color_flag);
        Self {
            colors: Colors::new(use_color),
        }
    }

    /// Print an error message to stderr with appropriate coloring
    pub fn print_error(&self, message: &str) {
        eprintln!("{}", message.style(self.colors.error));
    }

    fn fmt_id(&self, id: &impl std::fmt::Display) -> String {
        format!("{}", format!("#{id}").style(self.colors.task_id))
    }

    fn status_symbol_style(&self, status: TaskStatus) -> (&'static str, Style) {
        match status {
            TaskStatus::Completed => ("✓", self.colors.completed),
            TaskStatus::InProgress => ("◐", self.colors.in_progress),
            TaskStatus::Pending => ("○", self.colors.pending),
        }
    }

    fn priority_style(&self, priority: i32) -> Style {
        match priority {
            4 | 5 => self.colors.priority_high,
            3 => self.colors.priority_med,
            _ => Style::new(),
        }
    }

    pub fn print(&self, command: &Command, output: &str) {
        match command {
            Command::Init => self.print_init(output),
            Command::Task(TaskCommand::Delete { .. }) => println!("Task deleted"),
            Command::Task(TaskCommand::List(_))
            | Command::Task(TaskCommand::Pending)
            | Command::Task(TaskCommand::Search(_)) => self.print_task_list(output),
            Command::Task(_) => self.print_task(output),
            Command::Schedule(ScheduleCommand::Show(_)) => self.print_day_schedule(output),
            Command::Schedule(ScheduleCommand::Blocks(_)) => self.print_blocks(output),
            Command::Progress(ProgressCommand::Record(_)) => self.print_progress_entry(output),
            Command::Progress(ProgressCommand::Log) => self.print_progress_log(output),
            Command::Progress(ProgressCommand::Insights(_)) => self.print_insights(output),
            Command::Rollover(_) => self.print_rollover(output),
            Command::Report(_) => self.print_report(output),
            Command::Data(DataCommand::Export { .. }) => self.print_data_export(output),
            // PRECONDITION: Completions handled in main() before print() is called
            Command::Completions { .. } => unreachable!("completions handled before print()"),
        }
    }

    fn print_init(&self, output: &str) {
        let path = serde_json::from_str::<serde_json::Value>(output)
            .ok()
            .and_then(|v| v.get("path").and_then(|p| p.as_str()).map(String::from));
        match path {
            Some(path) => println!("Initialized dayplan data in {}", path),
            None => println!("Initialized dayplan data"),
        }
    }

    fn task_line(&self, task: &Task) -> String {
        let (sym, style) = self.status_symbol_style(task.status);
        let mut line = format!(
            "[{}] {} {} {}",
            sym.style(style),
            self.fmt_id(&task.id),
            format!("P{}", task.priority).style(self.priority_style(task.priority)),
            task.title
        );
        if task.rollover_count > 0 {
            line.push_str(&format!(
                " {}",
                format!("↻{}", task.rollover_count).style(self.colors.rolled)
            ));
        }
        line
    }

    fn print_task_list(&self, output: &str) {
        if let Ok(tasks) = serde_json::from_str::<Vec<Task>>(output) {
            if tasks.is_empty() {
                println!("No tasks found");
                return;
            }

            let mut current_due = None;
            for task in &tasks {
                if current_due != Some(task.due_date) {
                    println!("{}", task.due_date.to_string().style(self.colors.heading));
                    current_due = Some(task.due_date);
                }
                println!("  {}", self.task_line(task));
            }

            let completed = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count();
            let in_progress = tasks
                .iter()
                .filter(|t| t.status == TaskStatus::InProgress)
                .count();
            println!();
            println!(
                "{}/{} complete | {} in progress | {} pending",
                completed.style(self.colors.completed),
                tasks.len(),
                in_progress.style(self.colors.in_progress),
                tasks.len() - completed - in_progress,
            );
        } else {
            println!("{}", output);
        }
    }

    fn print_task(&self, output: &str) {
        if let Ok(task) = serde_json::from_str::<Task>(output) {
            let (_, status_style) = self.status_symbol_style(task.status);
            println!(
                "Task: {} ({})",
                self.fmt_id(&task.id),
                task.status.as_str().style(status_style)
            );
            println!("  Title: {}", task.title);
            if !task.description.is_empty() {
                println!("  Description: {}", task.description);
            }
            println!("  Category: {}", task.category);
            println!(
                "  Priority: {}",
                task.priority.style(self.priority_style(task.priority))
            );
            println!("  Due: {} (created {})", task.due_date, task.created_date);
            if task.rollover_count > 0 {
                println!(
                    "  Rolled over: {}",
                    task.rollover_count.style(self.colors.rolled)
                );
            }
            if let Some(ref block) = task.time_block {
                println!("  Block: {}", block);
            }
        } else {
            println!("{}", output);
        }
    }

    fn block_header(&self, block: &ScheduleBlock) -> String {
        format!(
            "{}-{} {} {}",
            block.start_time.format(TIME_FORMAT),
            block.end_time.format(TIME_FORMAT),
            block.block_name.style(self.colors.heading),
            format!("({})", block.block_type).style(self.colors.dim)
        )
    }

    fn print_day_schedule(&self, output: &str) {
        if let Ok(schedule) = serde_json::from_str::<DaySchedule>(output) {
            println!(
                "{} {}",
                weekday_name(schedule.day).style(self.colors.heading),
                schedule.date
            );
            if schedule.blocks.is_empty() {
                println!("No blocks scheduled");
                return;
            }
            for scheduled in &schedule.blocks {
                println!();
                println!("{}", self.block_header(&scheduled.block));
                if scheduled.tasks.is_empty() {
                    println!("  {}", "no tasks".style(self.colors.dim));
                }
                for task in &scheduled.tasks {
                    println!("  {}", self.task_line(task));
                }
            }
        } else {
            println!("{}", output);
        }
    }

    fn print_blocks(&self, output: &str) {
        if let Ok(blocks) = serde_json::from_str::<Vec<ScheduleBlock>>(output) {
            if blocks.is_empty() {
                println!("No blocks found");
                return;
            }
            let mut current_day = None;
            for block in &blocks {
                if current_day != Some(block.day) {
                    println!("{}", weekday_name(block.day).style(self.colors.heading));
                    current_day = Some(block.day);
                }
                let ids: Vec<String> = block.task_ids.iter().map(|id| self.fmt_id(id)).collect();
                if ids.is_empty() {
                    println!("  [{}] {}", block.block_id, self.block_header(block));
                } else {
                    println!(
                        "  [{}] {} {}",
                        block.block_id,
                        self.block_header(block),
                        ids.join(" ")
                    );
                }
            }
        } else {
            println!("{}", output);
        }
    }

    fn score_style(&self, score: f64) -> Style {
        if score >= 80.0 {
            self.colors.completed
        } else if score >= 50.0 {
            self.colors.in_progress
        } else {
            self.colors.priority_high
        }
    }

    fn entry_line(&self, entry: &ProgressEntry) -> String {
        let mut line = format!(
            "{}  {} done | {} pending | {} rolled over | {}%",
            entry.date,
            entry.completed_tasks.style(self.colors.completed),
            entry.pending_tasks,
            entry.rolled_over_tasks.style(self.colors.rolled),
            entry
                .productivity_score
                .style(self.score_style(entry.productivity_score)),
        );
        if !entry.notes.is_empty() {
            line.push_str(&format!("  {}", entry.notes.style(self.colors.dim)));
        }
        line
    }

    fn print_progress_entry(&self, output: &str) {
        if let Ok(entry) = serde_json::from_str::<ProgressEntry>(output) {
            println!("Recorded {}", self.entry_line(&entry));
        } else {
            println!("{}", output);
        }
    }

    fn print_progress_log(&self, output: &str) {
        if let Ok(entries) = serde_json::from_str::<Vec<ProgressEntry>>(output) {
            if entries.is_empty() {
                println!("Progress log is empty");
            }
            for entry in &entries {
                println!("{}", self.entry_line(entry));
            }
        } else {
            println!("{}", output);
        }
    }

    fn print_insights(&self, output: &str) {
        if let Ok(insights) = serde_json::from_str::<Insights>(output) {
            println!(
                "{} {} to {}",
                "Period".style(self.colors.heading),
                insights.start,
                insights.end
            );
            for entry in &insights.entries {
                println!("  {}", self.entry_line(entry));
            }
            let s = &insights.summary;
            println!();
            println!("  Days logged: {}", s.days_logged);
            println!(
                "  Average productivity: {}%",
                s.avg_productivity.style(self.score_style(s.avg_productivity))
            );
            println!(
                "  Completed: {} | Rolled over: {}",
                s.total_completed.style(self.colors.completed),
                s.total_rolled_over.style(self.colors.rolled)
            );
            println!(
                "  Completion rate: {}%",
                s.completion_rate.style(self.score_style(s.completion_rate))
            );
        } else {
            println!("{}", output);
        }
    }

    fn print_rollover(&self, output: &str) {
        if let Ok(report) = serde_json::from_str::<RolloverReport>(output) {
            let ids: Vec<String> = report.task_ids.iter().map(|id| self.fmt_id(id)).collect();
            if ids.is_empty() {
                println!("Migrated 0 incomplete tasks");
            } else {
                println!(
                    "Migrated {} incomplete tasks: {}",
                    report.migrated.style(self.colors.rolled),
                    ids.join(" ")
                );
            }
            if let Some(ref entry) = report.progress {
                println!("Logged {}", self.entry_line(entry));
            }
        } else {
            println!("{}", output);
        }
    }

    fn print_report(&self, output: &str) {
        if let Ok(report) = serde_json::from_str::<DailyReport>(output) {
            println!(
                "{} {}",
                "Daily report".style(self.colors.heading),
                report.date
            );
            println!(
                "  {}/{} complete ({}%)",
                report.completed_tasks.style(self.colors.completed),
                report.total_tasks,
                report
                    .completion_rate
                    .style(self.score_style(report.completion_rate))
            );
            if !report.categories.is_empty() {
                let parts: Vec<String> = report
                    .categories
                    .iter()
                    .map(|(name, count)| format!("{name}: {count}"))
                    .collect();
                println!("  Categories: {}", parts.join(", "));
            }
            if !report.priorities.is_empty() {
                let parts: Vec<String> = report
                    .priorities
                    .iter()
                    .rev()
                    .map(|(priority, count)| format!("P{priority}: {count}"))
                    .collect();
                println!("  Priorities: {}", parts.join(", "));
            }
            if !report.incomplete.is_empty() {
                println!("  Incomplete:");
                for task in &report.incomplete {
                    println!("    {}", self.task_line(task));
                }
            }
        } else {
            println!("{}", output);
        }
    }

    fn print_data_export(&self, output: &str) {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(output) {
            if let (Some(path), Some(tasks), Some(blocks), Some(entries)) = (
                json.get("path").and_then(|v| v.as_str()),
                json.get("tasks").and_then(|v| v.as_u64()),
                json.get("blocks").and_then(|v| v.as_u64()),
                json.get("entries").and_then(|v| v.as_u64()),
            ) {
                println!(
                    "Exported {} tasks, {} schedule blocks and {} progress rows to {}",
                    tasks, blocks, entries, path
                );
            } else {
                println!("{}", output);
            }
        } else {
            println!("{}", output);
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_wins() {
        assert!(!should_use_color_for(true, true));
    }

    #[test]
    fn non_tty_disables_color() {
        assert!(!should_use_color_for(false, false));
    }
}
