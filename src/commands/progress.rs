use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::core::{daily_report, rollover, DailyReport, Insights, ProgressService, RolloverReport};
use crate::error::Result;
use crate::store::Store;
use crate::types::ProgressEntry;

use super::task::parse_date;

#[derive(Subcommand, Clone)]
pub enum ProgressCommand {
    /// Append today's completed/pending counts to the progress log
    Record(RecordArgs),
    /// Print the whole progress log
    Log,
    /// Summarize the progress log over recent days
    Insights(InsightsArgs),
}

#[derive(Args, Clone)]
pub struct RecordArgs {
    #[arg(short = 'n', long, default_value = "")]
    pub note: String,

    /// Value for the rolled_over_tasks column
    #[arg(long, default_value_t = 0)]
    pub rolled_over: u32,
}

#[derive(Args, Clone)]
pub struct InsightsArgs {
    #[arg(long, default_value_t = 7)]
    pub days: u32,
}

#[derive(Args, Clone)]
pub struct RolloverArgs {
    /// Do not append a row to the progress log
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Report date (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub enum ProgressResult {
    Entry(ProgressEntry),
    Log(Vec<ProgressEntry>),
    Insights(Insights),
}

pub fn handle(
    store: &mut dyn Store,
    cmd: ProgressCommand,
    today: NaiveDate,
) -> Result<ProgressResult> {
    let mut svc = ProgressService::new(store);

    match cmd {
        ProgressCommand::Record(args) => Ok(ProgressResult::Entry(svc.record(
            today,
            args.rolled_over,
            &args.note,
        )?)),
        ProgressCommand::Log => Ok(ProgressResult::Log(svc.log()?)),
        ProgressCommand::Insights(args) => {
            Ok(ProgressResult::Insights(svc.insights(today, args.days)?))
        }
    }
}

pub fn handle_rollover(
    store: &mut dyn Store,
    args: &RolloverArgs,
    today: NaiveDate,
) -> Result<RolloverReport> {
    rollover::run(store, today, !args.no_log)
}

pub fn handle_report(
    store: &dyn Store,
    args: &ReportArgs,
    today: NaiveDate,
) -> Result<DailyReport> {
    daily_report(store, args.date.unwrap_or(today))
}
