//! Persistence for the three tables.
//!
//! Services only see the [`Store`] trait: every operation loads whole
//! tables into memory, works on plain records, and saves them back.

pub mod csv_store;
pub mod memory;
pub mod schema;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::{ProgressEntry, ScheduleBlock, Task};

pub trait Store {
    fn load_tasks(&self) -> Result<Vec<Task>>;

    /// Replace the whole task table.
    fn save_tasks(&mut self, tasks: &[Task]) -> Result<()>;

    fn load_schedule(&self) -> Result<Vec<ScheduleBlock>>;

    /// Replace the whole schedule table.
    fn save_schedule(&mut self, blocks: &[ScheduleBlock]) -> Result<()>;

    fn load_progress(&self) -> Result<Vec<ProgressEntry>>;

    /// Append one row to the progress log. Never deduplicates.
    fn append_progress(&mut self, entry: &ProgressEntry) -> Result<()>;
}
