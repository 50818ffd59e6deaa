//! Test utilities for CSV stores in temporary directories.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::error::Result;
use crate::id::TaskId;
use crate::store::CsvStore;
use crate::types::{Task, TaskStatus};

/// A data directory backed by a temporary directory, opened as a `CsvStore`.
pub struct TestDataDir {
    #[allow(dead_code)]
    tempdir: TempDir,
    root: PathBuf,
}

impl TestDataDir {
    pub fn new() -> io::Result<Self> {
        let tempdir = TempDir::new()?;
        let root = tempdir.path().join("pa_data");
        Ok(Self { tempdir, root })
    }

    /// Opens (and on first call, initializes) the store.
    pub fn open(&self) -> Result<CsvStore> {
        CsvStore::open(&self.root)
    }

    pub fn write_file(&self, name: &str, content: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(name), content)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }
}

pub fn date(s: &str) -> NaiveDate {
    crate::fields::parse_date(s).unwrap()
}

/// Minimal task record with the given id, status and due date.
pub fn task(id: u32, status: TaskStatus, due: &str) -> Task {
    Task {
        id: TaskId::new(id),
        title: format!("task {id}"),
        description: String::new(),
        category: "general".into(),
        priority: 1,
        status,
        created_date: date("2024-01-01"),
        due_date: date(due),
        rollover_count: 0,
        time_block: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn open_initializes_inside_tempdir() {
        let dir = TestDataDir::new().unwrap();
        assert!(!dir.file_exists("tasks.csv"));
        dir.open().unwrap();
        assert!(dir.file_exists("tasks.csv"));
        assert!(dir.file_exists("schedule.csv"));
        assert!(dir.file_exists("progress.csv"));
    }

    #[test]
    fn write_file_then_load() {
        let dir = TestDataDir::new().unwrap();
        dir.write_file(
            "tasks.csv",
            "task_id,title,description,category,priority,status,created_date,due_date,rollover_count,time_block\n\
             5,Apply,,Job Search,1,pending,2024-01-01,2024-01-01,2,\n",
        )
        .unwrap();

        let tasks = dir.open().unwrap().load_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].rollover_count, 2);
        assert_eq!(tasks[0].time_block, None);
    }
}
