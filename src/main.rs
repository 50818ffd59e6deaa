use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dayplan::commands::{
    data, progress, schedule, task, DataCommand, DataResult, ProgressCommand, ProgressResult,
    ReportArgs, RolloverArgs, ScheduleCommand, ScheduleResult, TaskCommand, TaskResult,
};
use dayplan::error;
use dayplan::store::CsvStore;

mod output;

use output::Printer;

#[derive(Parser)]
#[command(name = "dp")]
#[command(version)]
#[command(
    about = "dayplan - personal task and schedule assistant",
    long_about = r#"
dayplan (dp) - Tasks, daily time blocks and a progress log in plain CSV files.

Features:
  • Tasks with priority, category, due date and time block
  • Weekly schedule of fixed time blocks
  • End-of-day rollover of unfinished tasks
  • Progress log with productivity score and insights

Environment:
  DAYPLAN_DATA_DIR  Override data directory
  NO_COLOR          Disable colored output
  RUST_LOG          Log filter (overrides -v)
"#
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output in JSON format (for programmatic use)
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Override data directory (default: ./pa_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = task::parse_date)]
    today: Option<NaiveDate>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Task management (add, update, status, queries)
    #[command(subcommand)]
    Task(TaskCommand),

    /// Weekly time blocks
    #[command(subcommand)]
    Schedule(ScheduleCommand),

    /// Progress log
    #[command(subcommand)]
    Progress(ProgressCommand),

    /// Move pending tasks due today or earlier to the next day
    #[command(
        about = "Roll over incomplete tasks",
        long_about = r#"
Roll over incomplete tasks.

Every pending task due today or earlier moves one day forward and its
rollover count goes up by one. Completed and in-progress tasks are left
alone. Afterwards a row with today's counts is appended to the progress
log unless --no-log is given.
"#
    )]
    Rollover(RolloverArgs),

    /// Summary of the tasks due on a date
    Report(ReportArgs),

    /// Data export
    #[command(subcommand)]
    Data(DataCommand),

    /// Generate shell completions
    #[command(
        about = "Generate shell completions",
        long_about = r#"
Generate shell completions for dp CLI.

Examples:
  dp completions bash > ~/.local/share/bash-completion/completions/dp
  dp completions zsh > ~/.zfunc/_dp
  dp completions fish > ~/.config/fish/completions/dp.fish
"#
    )]
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },

    /// Create the data directory and CSV files
    #[command(
        about = "Initialize data files",
        long_about = r#"
Initialize the dayplan data directory.

The directory is resolved as:
  1. --data-dir (if given)
  2. DAYPLAN_DATA_DIR (if set)
  3. CWD/pa_data (fallback)

Creates tasks.csv, schedule.csv and progress.csv with header rows and
seeds the schedule with the default weekly blocks. Existing files are kept.
Usually runs automatically on first command.
"#
    )]
    Init,
}

/// Resolution order:
/// 1. DAYPLAN_DATA_DIR env var (if set)
/// 2. CWD/pa_data
fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("DAYPLAN_DATA_DIR") {
        return PathBuf::from(path);
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("pa_data")
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // PRECONDITION: Completions bypass normal output flow - raw shell script to stdout
    if let Command::Completions { shell } = &cli.command {
        generate(*shell, &mut Cli::command(), "dp", &mut io::stdout());
        return;
    }

    init_tracing(cli.verbose);

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!(data_dir = %data_dir.display(), %today, "resolved environment");

    let result = run(&cli.command, &data_dir, today);

    match result {
        Ok(output) => {
            if cli.json {
                println!("{}", output);
            } else {
                let printer = Printer::new(cli.no_color);
                printer.print(&cli.command, &output);
            }
        }
        Err(e) => {
            if cli.json {
                let err = serde_json::json!({ "error": e.to_string() });
                eprintln!("{}", err);
            } else {
                let printer = Printer::new_for_stderr(cli.no_color);
                printer.print_error(&format!("Error: {}", e));
            }
            std::process::exit(1);
        }
    }
}

fn run(command: &Command, data_dir: &Path, today: NaiveDate) -> error::Result<String> {
    match command {
        Command::Init => {
            CsvStore::open(data_dir)?;
            Ok(serde_json::json!({ "initialized": true, "path": data_dir }).to_string())
        }
        Command::Task(cmd) => {
            let mut store = CsvStore::open(data_dir)?;
            match task::handle(&mut store, cmd.clone(), today)? {
                TaskResult::One(t) => Ok(serde_json::to_string_pretty(&t)?),
                TaskResult::Many(ts) => Ok(serde_json::to_string_pretty(&ts)?),
                TaskResult::Deleted => Ok(serde_json::json!({ "deleted": true }).to_string()),
            }
        }
        Command::Schedule(cmd) => {
            let store = CsvStore::open(data_dir)?;
            match schedule::handle(&store, cmd.clone(), today)? {
                ScheduleResult::Day(day) => Ok(serde_json::to_string_pretty(&day)?),
                ScheduleResult::Blocks(blocks) => Ok(serde_json::to_string_pretty(&blocks)?),
            }
        }
        Command::Progress(cmd) => {
            let mut store = CsvStore::open(data_dir)?;
            match progress::handle(&mut store, cmd.clone(), today)? {
                ProgressResult::Entry(entry) => Ok(serde_json::to_string_pretty(&entry)?),
                ProgressResult::Log(entries) => Ok(serde_json::to_string_pretty(&entries)?),
                ProgressResult::Insights(insights) => Ok(serde_json::to_string_pretty(&insights)?),
            }
        }
        Command::Rollover(args) => {
            let mut store = CsvStore::open(data_dir)?;
            let report = progress::handle_rollover(&mut store, args, today)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Command::Report(args) => {
            let store = CsvStore::open(data_dir)?;
            let report = progress::handle_report(&store, args, today)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Command::Data(cmd) => {
            let store = CsvStore::open(data_dir)?;
            match data::handle(&store, cmd.clone())? {
                DataResult::Exported {
                    path,
                    tasks,
                    blocks,
                    entries,
                } => Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "exported": true,
                    "path": path,
                    "tasks": tasks,
                    "blocks": blocks,
                    "entries": entries
                }))?),
            }
        }
        // PRECONDITION: Completions handled in main() before run() is called
        Command::Completions { .. } => unreachable!("completions handled before run()"),
    }
}
