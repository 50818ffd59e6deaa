use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::store::schema::{
    self, PROGRESS_COLUMNS, PROGRESS_FILE, SCHEDULE_COLUMNS, SCHEDULE_FILE, TASKS_FILE,
    TASK_COLUMNS,
};
use crate::store::Store;
use crate::types::{ProgressEntry, ScheduleBlock, Task};

/// Three CSV files with header rows inside one data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Open the store at `dir`, creating the directory and any missing file.
    ///
    /// A missing `schedule.csv` is seeded with the default weekly blocks.
    /// Existing files are left untouched.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { dir: dir.into() };
        fs::create_dir_all(&store.dir)?;

        let tasks = store.tasks_path();
        if !tasks.exists() {
            write_rows::<Task>(&tasks, &TASK_COLUMNS, &[])?;
            info!(path = %tasks.display(), "created task store");
        }

        let schedule = store.schedule_path();
        if !schedule.exists() {
            let blocks = schema::default_schedule();
            write_rows(&schedule, &SCHEDULE_COLUMNS, &blocks)?;
            info!(path = %schedule.display(), blocks = blocks.len(), "seeded schedule");
        }

        let progress = store.progress_path();
        if !progress.exists() {
            write_rows::<ProgressEntry>(&progress, &PROGRESS_COLUMNS, &[])?;
            info!(path = %progress.display(), "created progress log");
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.dir.join(SCHEDULE_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.dir.join(PROGRESS_FILE)
    }
}

impl Store for CsvStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        read_rows(&self.tasks_path(), &TASK_COLUMNS)
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        write_rows(&self.tasks_path(), &TASK_COLUMNS, tasks)
    }

    fn load_schedule(&self) -> Result<Vec<ScheduleBlock>> {
        read_rows(&self.schedule_path(), &SCHEDULE_COLUMNS)
    }

    fn save_schedule(&mut self, blocks: &[ScheduleBlock]) -> Result<()> {
        write_rows(&self.schedule_path(), &SCHEDULE_COLUMNS, blocks)
    }

    fn load_progress(&self) -> Result<Vec<ProgressEntry>> {
        read_rows(&self.progress_path(), &PROGRESS_COLUMNS)
    }

    fn append_progress(&mut self, entry: &ProgressEntry) -> Result<()> {
        let path = self.progress_path();
        let mut rows: Vec<ProgressEntry> = if path.exists() {
            read_rows(&path, &PROGRESS_COLUMNS)?
        } else {
            Vec::new()
        };
        rows.push(entry.clone());
        write_rows(&path, &PROGRESS_COLUMNS, &rows)?;

        debug!(path = %path.display(), date = %entry.date, "appended progress row");
        Ok(())
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path, columns: &[&str]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?;
    if !headers.iter().eq(columns.iter().copied()) {
        return Err(PlanError::MissingHeader {
            file: path.display().to_string(),
            expected: columns.join(","),
        });
    }

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

    debug!(path = %path.display(), rows = rows.len(), "loaded table");
    Ok(rows)
}

/// Rewrite `path` with a header row followed by `rows`.
///
/// Rows go to a sibling temp file which then replaces the target, so an
/// interrupted write leaves the previous contents intact.
fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(columns)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), rows = rows.len(), "saved table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::id::TaskId;
    use crate::types::TaskStatus;

    fn sample_task(id: u32, time_block: Option<&str>) -> Task {
        Task {
            id: TaskId::new(id),
            title: "Complete 2 LeetCode problems".into(),
            description: "Focus on dynamic programming, with commas".into(),
            category: "DSA".into(),
            priority: 1,
            status: TaskStatus::InProgress,
            created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            rollover_count: 2,
            time_block: time_block.map(String::from),
        }
    }

    #[test]
    fn open_creates_files_with_headers() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::open(dir.path().join("pa_data")).unwrap();

        let tasks = fs::read_to_string(store.tasks_path()).unwrap();
        assert_eq!(tasks.trim_end(), TASK_COLUMNS.join(","));

        let progress = fs::read_to_string(store.progress_path()).unwrap();
        assert_eq!(progress.trim_end(), PROGRESS_COLUMNS.join(","));

        assert_eq!(store.load_schedule().unwrap().len(), 35);
        assert!(store.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn open_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::open(dir.path()).unwrap();
        store.save_tasks(&[sample_task(1, None)]).unwrap();
        store.save_schedule(&[]).unwrap();

        let reopened = CsvStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load_tasks().unwrap().len(), 1);
        assert!(reopened.load_schedule().unwrap().is_empty());
    }

    #[test]
    fn tasks_round_trip_including_empty_time_block() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::open(dir.path()).unwrap();
        let tasks = vec![
            sample_task(1, Some("Core Learning Sessions")),
            sample_task(2, None),
        ];

        store.save_tasks(&tasks).unwrap();
        assert_eq!(store.load_tasks().unwrap(), tasks);
        assert!(!dir.path().join("tasks.csv.tmp").exists());
    }

    #[test]
    fn schedule_task_ids_are_semicolon_joined() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::open(dir.path()).unwrap();
        let mut blocks = store.load_schedule().unwrap();
        blocks[0].task_ids = BTreeSet::from([TaskId::new(3), TaskId::new(1)]);

        store.save_schedule(&blocks).unwrap();

        let raw = fs::read_to_string(store.schedule_path()).unwrap();
        let first_row = raw.lines().nth(1).unwrap();
        assert_eq!(
            first_row,
            "1,Monday,06:00,06:50,Morning Routine & Mental Warm-Up,routine,1;3"
        );
        assert_eq!(store.load_schedule().unwrap(), blocks);
    }

    #[test]
    fn append_progress_keeps_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::open(dir.path()).unwrap();
        let entry = ProgressEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            completed_tasks: 2,
            pending_tasks: 1,
            rolled_over_tasks: 1,
            productivity_score: 66.67,
            notes: String::new(),
        };

        store.append_progress(&entry).unwrap();
        store.append_progress(&entry).unwrap();

        assert_eq!(store.load_progress().unwrap(), vec![entry.clone(), entry]);
    }

    #[test]
    fn malformed_number_is_a_csv_error() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::open(dir.path()).unwrap();
        fs::write(
            store.tasks_path(),
            format!(
                "{}\n1,t,d,c,high,pending,2024-01-01,2024-01-01,0,\n",
                TASK_COLUMNS.join(",")
            ),
        )
        .unwrap();

        assert!(matches!(store.load_tasks(), Err(PlanError::Csv(_))));
    }

    #[test]
    fn wrong_header_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::open(dir.path()).unwrap();
        fs::write(store.progress_path(), "day,score\n").unwrap();

        assert!(matches!(
            store.load_progress(),
            Err(PlanError::MissingHeader { .. })
        ));
    }

    #[test]
    fn append_after_row_without_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let mut store = CsvStore::open(dir.path()).unwrap();
        fs::write(
            store.progress_path(),
            format!(
                "{}\n2024-01-01,1,1,0,50.0,hand edited",
                PROGRESS_COLUMNS.join(",")
            ),
        )
        .unwrap();
        let entry = ProgressEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            completed_tasks: 0,
            pending_tasks: 0,
            rolled_over_tasks: 0,
            productivity_score: 0.0,
            notes: String::new(),
        };

        store.append_progress(&entry).unwrap();

        let log = store.load_progress().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].notes, "hand edited");
        assert_eq!(log[1], entry);
        assert!(!dir.path().join("progress.csv.tmp").exists());
    }

    #[test]
    fn bad_block_time_names_the_expected_format() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::open(dir.path()).unwrap();
        fs::write(
            store.schedule_path(),
            format!(
                "{}\n1,Monday,6,06:50,Morning,routine,\n",
                SCHEDULE_COLUMNS.join(",")
            ),
        )
        .unwrap();

        let err = store.load_schedule().unwrap_err();
        assert!(matches!(err, PlanError::Csv(_)));
        assert!(err.to_string().contains("expected HH:MM"));
    }
}
