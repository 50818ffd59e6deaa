//! Tests for TaskService over an in-memory store.
//!
//! Tests cover:
//! - Id assignment and defaults on add
//! - Validation of title and priority
//! - Status transitions and rollover reset
//! - Delete detaching ids from schedule blocks
//! - Listing, pending and search ordering

use chrono::NaiveDate;
use dayplan::core::TaskService;
use dayplan::error::PlanError;
use dayplan::id::{BlockId, TaskId};
use dayplan::store::{MemoryStore, Store};
use dayplan::types::{CreateTaskInput, ListTasksFilter, TaskStatus, UpdateTaskInput};

fn setup_store() -> MemoryStore {
    MemoryStore::seeded()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn input(title: &str, priority: i32, due: &str) -> CreateTaskInput {
    CreateTaskInput {
        title: title.to_string(),
        description: String::new(),
        category: "general".to_string(),
        priority,
        due_date: date(due),
        time_block: None,
    }
}

// ==================== Add ====================

#[test]
fn test_add_first_task_gets_id_one() {
    let mut store = setup_store();
    let mut service = TaskService::new(&mut store);

    let task = service
        .add(&input("Read chapter 3", 2, "2024-01-02"), date("2024-01-01"))
        .unwrap();

    assert_eq!(task.id, TaskId::new(1));
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.rollover_count, 0);
    assert_eq!(task.created_date, date("2024-01-01"));
    assert_eq!(task.due_date, date("2024-01-02"));
}

#[test]
fn test_add_uses_highest_id_plus_one() {
    let mut store = setup_store();
    {
        let mut service = TaskService::new(&mut store);
        service.add(&input("a", 1, "2024-01-02"), date("2024-01-01")).unwrap();
        service.add(&input("b", 1, "2024-01-02"), date("2024-01-01")).unwrap();
    }
    // gap in the id sequence
    store.tasks.retain(|t| t.id != TaskId::new(1));
    store.tasks[0].id = TaskId::new(7);

    let task = TaskService::new(&mut store)
        .add(&input("c", 1, "2024-01-02"), date("2024-01-01"))
        .unwrap();
    assert_eq!(task.id, TaskId::new(8));
}

#[test]
fn test_add_fails_when_ids_run_out() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("last", 1, "2024-01-02"), date("2024-01-01"))
        .unwrap();
    store.tasks[0].id = TaskId::new(u32::MAX);

    let result =
        TaskService::new(&mut store).add(&input("one more", 1, "2024-01-02"), date("2024-01-01"));
    assert!(matches!(result, Err(PlanError::IdsExhausted)));
    assert_eq!(store.tasks.len(), 1);
}

#[test]
fn test_add_rejects_empty_title() {
    let mut store = setup_store();
    let result =
        TaskService::new(&mut store).add(&input("   ", 1, "2024-01-02"), date("2024-01-01"));
    assert!(matches!(result, Err(PlanError::EmptyTitle)));
    assert!(store.tasks.is_empty());
}

#[test]
fn test_add_rejects_priority_out_of_range() {
    let mut store = setup_store();
    let mut service = TaskService::new(&mut store);

    let zero = service.add(&input("x", 0, "2024-01-02"), date("2024-01-01"));
    assert!(matches!(zero, Err(PlanError::InvalidPriority(0))));

    let six = service.add(&input("x", 6, "2024-01-02"), date("2024-01-01"));
    assert!(matches!(six, Err(PlanError::InvalidPriority(6))));
}

// ==================== Status ====================

#[test]
fn test_complete_resets_rollover_count() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("Apply", 1, "2024-01-01"), date("2024-01-01"))
        .unwrap();
    store.tasks[0].rollover_count = 3;

    let task = TaskService::new(&mut store)
        .set_status(TaskId::new(1), TaskStatus::Completed)
        .unwrap();

    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.rollover_count, 0);
    assert_eq!(store.tasks[0].rollover_count, 0);
}

#[test]
fn test_in_progress_keeps_rollover_count() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("Apply", 1, "2024-01-01"), date("2024-01-01"))
        .unwrap();
    store.tasks[0].rollover_count = 3;

    let task = TaskService::new(&mut store)
        .set_status(TaskId::new(1), TaskStatus::InProgress)
        .unwrap();
    assert_eq!(task.rollover_count, 3);
}

#[test]
fn test_status_unknown_id_changes_nothing() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("Apply", 1, "2024-01-01"), date("2024-01-01"))
        .unwrap();
    let before = store.tasks.clone();

    let result = TaskService::new(&mut store).set_status(TaskId::new(42), TaskStatus::Completed);

    assert!(matches!(result, Err(PlanError::TaskNotFound(id)) if id == TaskId::new(42)));
    assert_eq!(store.tasks, before);
}

// ==================== Update / Delete ====================

#[test]
fn test_update_changes_only_given_fields() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("Apply", 1, "2024-01-01"), date("2024-01-01"))
        .unwrap();

    let task = TaskService::new(&mut store)
        .update(
            TaskId::new(1),
            &UpdateTaskInput {
                priority: Some(4),
                time_block: Some(Some("Job Search & Networking".to_string())),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(task.title, "Apply");
    assert_eq!(task.priority, 4);
    assert_eq!(task.time_block.as_deref(), Some("Job Search & Networking"));
}

#[test]
fn test_update_invalid_priority_fails() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("Apply", 1, "2024-01-01"), date("2024-01-01"))
        .unwrap();

    let result = TaskService::new(&mut store).update(
        TaskId::new(1),
        &UpdateTaskInput {
            priority: Some(9),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(PlanError::InvalidPriority(9))));
    assert_eq!(store.tasks[0].priority, 1);
}

#[test]
fn test_delete_detaches_from_schedule_blocks() {
    let mut store = setup_store();
    TaskService::new(&mut store)
        .add(&input("Apply", 1, "2024-01-01"), date("2024-01-01"))
        .unwrap();
    store.schedule[0].task_ids.insert(TaskId::new(1));

    TaskService::new(&mut store).delete(TaskId::new(1)).unwrap();

    assert!(store.tasks.is_empty());
    let block = store
        .load_schedule()
        .unwrap()
        .into_iter()
        .find(|b| b.block_id == BlockId::new(1))
        .unwrap();
    assert!(block.task_ids.is_empty());
}

#[test]
fn test_delete_unknown_id_fails() {
    let mut store = setup_store();
    let result = TaskService::new(&mut store).delete(TaskId::new(3));
    assert!(matches!(result, Err(PlanError::TaskNotFound(_))));
}

// ==================== Queries ====================

#[test]
fn test_list_orders_by_due_then_priority() {
    let mut store = setup_store();
    {
        let mut service = TaskService::new(&mut store);
        service.add(&input("later", 5, "2024-01-05"), date("2024-01-01")).unwrap();
        service.add(&input("low", 1, "2024-01-02"), date("2024-01-01")).unwrap();
        service.add(&input("high", 5, "2024-01-02"), date("2024-01-01")).unwrap();
    }

    let titles: Vec<String> = TaskService::new(&mut store)
        .list(&ListTasksFilter::default())
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["high", "low", "later"]);
}

#[test]
fn test_pending_excludes_completed() {
    let mut store = setup_store();
    {
        let mut service = TaskService::new(&mut store);
        service.add(&input("a", 1, "2024-01-02"), date("2024-01-01")).unwrap();
        service.add(&input("b", 1, "2024-01-02"), date("2024-01-01")).unwrap();
        service.add(&input("c", 1, "2024-01-02"), date("2024-01-01")).unwrap();
        service.set_status(TaskId::new(2), TaskStatus::Completed).unwrap();
        service.set_status(TaskId::new(3), TaskStatus::InProgress).unwrap();
    }

    let ids: Vec<TaskId> = TaskService::new(&mut store)
        .pending()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![TaskId::new(1), TaskId::new(3)]);
}

#[test]
fn test_search_is_case_insensitive() {
    let mut store = setup_store();
    {
        let mut service = TaskService::new(&mut store);
        let mut job = input("Send resume", 1, "2024-01-02");
        job.category = "Job Search".to_string();
        service.add(&job, date("2024-01-01")).unwrap();
        service.add(&input("Read book", 1, "2024-01-02"), date("2024-01-01")).unwrap();
    }

    let found = TaskService::new(&mut store).search("job").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Send resume");
}
