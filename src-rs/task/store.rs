use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::error::TaskError;

use super::types::{Task, TaskStatus};

/// Concurrency-safe store of task records, keyed by task id.
///
/// A single reader/writer lock guards the whole map; every consumer works
/// with value copies, so the store is the only place task state mutates.
pub struct TaskStore {
    tasks: RwLock<HashMap<String, Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
        }
    }

    // A poisoned map is still the authoritative map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Task>> {
        self.tasks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Task>> {
        self.tasks.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates and stores a new pending task, returning a copy of it.
    pub fn insert(&self, name: &str) -> Result<Task, TaskError> {
        if name.is_empty() {
            return Err(TaskError::Validation);
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
            result: None,
            error: None,
            duration: None,
        };

        self.write().insert(task.id.clone(), task.clone());
        Ok(task)
    }

    pub fn get(&self, id: &str) -> Result<Task, TaskError> {
        self.read().get(id).cloned().ok_or(TaskError::NotFound)
    }

    /// Returns copies of every stored task, in no particular order.
    pub fn list(&self) -> Vec<Task> {
        self.read().values().cloned().collect()
    }

    /// Replaces the stored record for `task.id` wholesale.
    ///
    /// The record must already exist; callers supply the complete desired
    /// value, not a delta. Two concurrent get-then-update sequences on the
    /// same id race and the later write wins silently.
    pub fn update(&self, task: Task) -> Result<(), TaskError> {
        let mut tasks = self.write();
        if !tasks.contains_key(&task.id) {
            return Err(TaskError::NotFound);
        }
        tasks.insert(task.id.clone(), task);
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<(), TaskError> {
        self.write().remove(id).map(|_| ()).ok_or(TaskError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn insert_creates_pending_task() {
        let store = TaskStore::new();

        let task = store.insert("Test Task").expect("insert failed");
        assert!(!task.id.is_empty());
        assert_eq!(task.name, "Test Task");
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.started_at.is_none());
        assert!(task.result.is_none());
        assert!(task.error.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_rejects_empty_name() {
        let store = TaskStore::new();

        let err = store.insert("").unwrap_err();
        assert_eq!(err, TaskError::Validation);
        assert_eq!(err.to_string(), "Task name is required");
        assert!(store.is_empty());
    }

    #[test]
    fn insert_mints_distinct_ids() {
        let store = TaskStore::new();

        let ids: HashSet<String> = (0..100)
            .map(|i| store.insert(&format!("task {i}")).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn get_returns_copy() {
        let store = TaskStore::new();
        let task = store.insert("Test Task").unwrap();

        let fetched = store.get(&task.id).expect("get failed");
        assert_eq!(fetched, task);

        let err = store.get("non-existent-id").unwrap_err();
        assert_eq!(err, TaskError::NotFound);
        assert_eq!(err.to_string(), "Task not found");
    }

    #[test]
    fn update_replaces_wholesale() {
        let store = TaskStore::new();
        let mut task = store.insert("Test Task").unwrap();

        task.status = TaskStatus::Running;
        task.started_at = Some(Utc::now());
        store.update(task.clone()).expect("update failed");

        let updated = store.get(&task.id).unwrap();
        assert_eq!(updated.status, TaskStatus::Running);
        assert!(updated.started_at.is_some());
    }

    #[test]
    fn update_missing_id_fails() {
        let store = TaskStore::new();
        let mut ghost = store.insert("Test Task").unwrap();
        store.delete(&ghost.id).unwrap();

        ghost.status = TaskStatus::Completed;
        assert_eq!(store.update(ghost), Err(TaskError::NotFound));
    }

    #[test]
    fn update_never_creates() {
        let store = TaskStore::new();
        let mut task = store.insert("Test Task").unwrap();
        task.id = "some-other-id".to_string();

        assert_eq!(store.update(task), Err(TaskError::NotFound));
        assert_eq!(store.len(), 1);
    }

    // The wholesale-replace contract means the second of two get-then-update
    // writers silently clobbers the first. Documented baseline, not a bug.
    #[test]
    fn update_is_last_write_wins() {
        let store = TaskStore::new();
        let task = store.insert("Test Task").unwrap();

        let mut first = store.get(&task.id).unwrap();
        let mut second = store.get(&task.id).unwrap();

        first.result = Some("from first writer".to_string());
        second.duration = Some("9s".to_string());

        store.update(first).unwrap();
        store.update(second).unwrap();

        let stored = store.get(&task.id).unwrap();
        assert_eq!(stored.duration.as_deref(), Some("9s"));
        assert!(stored.result.is_none());
    }

    #[test]
    fn delete_removes_record() {
        let store = TaskStore::new();
        let task = store.insert("Test Task").unwrap();

        store.delete(&task.id).expect("delete failed");
        assert_eq!(store.get(&task.id), Err(TaskError::NotFound));
        assert_eq!(store.delete("non-existent-id"), Err(TaskError::NotFound));
    }

    #[test]
    fn list_returns_live_tasks() {
        let store = TaskStore::new();
        assert!(store.list().is_empty());

        let a = store.insert("Task 1").unwrap();
        store.insert("Task 2").unwrap();
        store.insert("Task 3").unwrap();
        assert_eq!(store.list().len(), 3);

        store.delete(&a.id).unwrap();
        let remaining = store.list();
        assert_eq!(remaining.len(), 2);
        let ids: HashSet<String> = remaining.into_iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(!ids.contains(&a.id));
    }
}
