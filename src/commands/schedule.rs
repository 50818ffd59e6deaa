use chrono::{NaiveDate, Weekday};
use clap::{Args, Subcommand};

use crate::core::{DaySchedule, ScheduleService};
use crate::error::Result;
use crate::store::Store;
use crate::types::ScheduleBlock;

use super::task::parse_date;

fn parse_weekday(s: &str) -> std::result::Result<Weekday, String> {
    crate::fields::parse_weekday(s).map_err(|e| format!("{e}"))
}

#[derive(Subcommand, Clone)]
pub enum ScheduleCommand {
    /// Show the blocks for a date with their tasks (default: today)
    Show(ShowArgs),
    /// List the raw schedule blocks
    Blocks(BlocksArgs),
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Clone)]
pub struct BlocksArgs {
    /// Weekday name (Monday, tue, ...). Omit for the whole week.
    #[arg(long, value_parser = parse_weekday)]
    pub day: Option<Weekday>,
}

pub enum ScheduleResult {
    Day(DaySchedule),
    Blocks(Vec<ScheduleBlock>),
}

pub fn handle(
    store: &dyn Store,
    cmd: ScheduleCommand,
    today: NaiveDate,
) -> Result<ScheduleResult> {
    let svc = ScheduleService::new(store);

    match cmd {
        ScheduleCommand::Show(args) => Ok(ScheduleResult::Day(
            svc.day_schedule(args.date.unwrap_or(today))?,
        )),
        ScheduleCommand::Blocks(args) => match args.day {
            Some(day) => Ok(ScheduleResult::Blocks(svc.blocks_for(day)?)),
            None => Ok(ScheduleResult::Blocks(store.load_schedule()?)),
        },
    }
}
