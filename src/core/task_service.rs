use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{PlanError, Result};
use crate::id::TaskId;
use crate::store::Store;
use crate::types::{
    CreateTaskInput, ListTasksFilter, Task, TaskStatus, UpdateTaskInput, MAX_PRIORITY,
    MIN_PRIORITY,
};

fn validate_priority(priority: i32) -> Result<()> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(PlanError::InvalidPriority(priority));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(PlanError::EmptyTitle);
    }
    Ok(())
}

/// Due date ASC, priority DESC, id ASC
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub struct TaskService<'a> {
    store: &'a mut dyn Store,
}

impl<'a> TaskService<'a> {
    pub fn new(store: &'a mut dyn Store) -> Self {
        Self { store }
    }

    pub fn add(&mut self, input: &CreateTaskInput, today: NaiveDate) -> Result<Task> {
        validate_title(&input.title)?;
        validate_priority(input.priority)?;

        let mut tasks = self.store.load_tasks()?;
        let id = TaskId::next_after(tasks.iter().map(|t| &t.id)).ok_or(PlanError::IdsExhausted)?;

        let task = Task {
            id,
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            category: input.category.clone(),
            priority: input.priority,
            status: TaskStatus::Pending,
            created_date: today,
            due_date: input.due_date,
            rollover_count: 0,
            time_block: input.time_block.clone().filter(|b| !b.trim().is_empty()),
        };
        tasks.push(task.clone());
        self.store.save_tasks(&tasks)?;

        info!(task_id = %task.id, title = %task.title, "task added");
        Ok(task)
    }

    pub fn get(&self, id: TaskId) -> Result<Task> {
        self.store
            .load_tasks()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(PlanError::TaskNotFound(id))
    }

    pub fn list(&self, filter: &ListTasksFilter) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .store
            .load_tasks()?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        sort_tasks(&mut tasks);
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Tasks that are pending or in progress
    pub fn pending(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .store
            .load_tasks()?
            .into_iter()
            .filter(|t| t.status.is_open())
            .collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    pub fn update(&mut self, id: TaskId, input: &UpdateTaskInput) -> Result<Task> {
        if let Some(ref title) = input.title {
            validate_title(title)?;
        }
        if let Some(priority) = input.priority {
            validate_priority(priority)?;
        }

        let mut tasks = self.store.load_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(PlanError::TaskNotFound(id))?;

        if let Some(ref title) = input.title {
            task.title = title.trim().to_string();
        }
        if let Some(ref description) = input.description {
            task.description = description.clone();
        }
        if let Some(ref category) = input.category {
            task.category = category.clone();
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(due_date) = input.due_date {
            task.due_date = due_date;
        }
        if let Some(ref block) = input.time_block {
            task.time_block = block.clone().filter(|b| !b.trim().is_empty());
        }

        let updated = task.clone();
        self.store.save_tasks(&tasks)?;

        info!(task_id = %id, "task updated");
        Ok(updated)
    }

    /// Change a task's status. Completing a task resets its rollover count.
    ///
    /// An unknown id fails before anything is written.
    pub fn set_status(&mut self, id: TaskId, status: TaskStatus) -> Result<Task> {
        let mut tasks = self.store.load_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(PlanError::TaskNotFound(id))?;

        task.status = status;
        if status == TaskStatus::Completed {
            task.rollover_count = 0;
        }

        let updated = task.clone();
        self.store.save_tasks(&tasks)?;

        info!(task_id = %id, status = %status, "task status updated");
        Ok(updated)
    }

    /// Delete a task and drop its id from every schedule block.
    pub fn delete(&mut self, id: TaskId) -> Result<()> {
        let mut tasks = self.store.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(PlanError::TaskNotFound(id));
        }
        self.store.save_tasks(&tasks)?;

        let mut blocks = self.store.load_schedule()?;
        let mut detached = 0;
        for block in &mut blocks {
            if block.task_ids.remove(&id) {
                detached += 1;
            }
        }
        if detached > 0 {
            self.store.save_schedule(&blocks)?;
        }

        info!(task_id = %id, detached, "task deleted");
        Ok(())
    }

    /// Case-insensitive substring match over title, description and category
    pub fn search(&self, query: &str) -> Result<Vec<Task>> {
        let needle = query.to_lowercase();
        let mut tasks: Vec<Task> = self
            .store
            .load_tasks()?
            .into_iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
                    || t.category.to_lowercase().contains(&needle)
            })
            .collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }
}
