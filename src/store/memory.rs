use crate::error::Result;
use crate::store::{schema, Store};
use crate::types::{ProgressEntry, ScheduleBlock, Task};

/// In-memory store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub tasks: Vec<Task>,
    pub schedule: Vec<ScheduleBlock>,
    pub progress: Vec<ProgressEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store with the default weekly schedule, same as a fresh `CsvStore`.
    pub fn seeded() -> Self {
        Self {
            schedule: schema::default_schedule(),
            ..Self::default()
        }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }
}

impl Store for MemoryStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        self.tasks = tasks.to_vec();
        Ok(())
    }

    fn load_schedule(&self) -> Result<Vec<ScheduleBlock>> {
        Ok(self.schedule.clone())
    }

    fn save_schedule(&mut self, blocks: &[ScheduleBlock]) -> Result<()> {
        self.schedule = blocks.to_vec();
        Ok(())
    }

    fn load_progress(&self) -> Result<Vec<ProgressEntry>> {
        Ok(self.progress.clone())
    }

    fn append_progress(&mut self, entry: &ProgressEntry) -> Result<()> {
        self.progress.push(entry.clone());
        Ok(())
    }
}
