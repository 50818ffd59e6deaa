use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::error::Result;
use crate::store::Store;
use crate::types::{ProgressEntry, ScheduleBlock, Task};

#[derive(Subcommand, Clone)]
pub enum DataCommand {
    /// Export tasks, schedule and progress log to one JSON file
    Export {
        /// Output file path (default: dayplan-export.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub version: String,
    pub exported_at: String,
    pub tasks: Vec<Task>,
    pub schedule: Vec<ScheduleBlock>,
    pub progress: Vec<ProgressEntry>,
}

pub enum DataResult {
    Exported {
        path: String,
        tasks: usize,
        blocks: usize,
        entries: usize,
    },
}

pub fn handle(store: &dyn Store, cmd: DataCommand) -> Result<DataResult> {
    match cmd {
        DataCommand::Export { output } => export_data(store, output),
    }
}

pub(crate) fn export_data(store: &dyn Store, output: Option<PathBuf>) -> Result<DataResult> {
    let output_path = output.unwrap_or_else(|| PathBuf::from("dayplan-export.json"));

    let export = ExportData {
        version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: chrono::Utc::now().to_rfc3339(),
        tasks: store.load_tasks()?,
        schedule: store.load_schedule()?,
        progress: store.load_progress()?,
    };

    let json = serde_json::to_string_pretty(&export)?;
    fs::write(&output_path, json)?;

    info!(path = %output_path.display(), tasks = export.tasks.len(), "exported data");
    Ok(DataResult::Exported {
        path: output_path.display().to_string(),
        tasks: export.tasks.len(),
        blocks: export.schedule.len(),
        entries: export.progress.len(),
    })
}
