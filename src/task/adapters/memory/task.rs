//! In-memory repository for checklist tasks.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::trip::domain::TripId;

/// Thread-safe in-memory task repository.
///
/// Tasks keep their insertion order. Trip references are not checked.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_sequence: u64,
}

#[derive(Debug)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

impl InMemoryTaskState {
    fn insert(&mut self, task: &Task) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tasks.insert(
            task.id(),
            StoredTask {
                sequence,
                task: task.clone(),
            },
        );
    }

    fn remove_where(&mut self, predicate: impl Fn(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, stored| !predicate(&stored.task));
        before - self.tasks.len()
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task);
        Ok(())
    }

    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let mut batch_ids = HashSet::new();
        for task in tasks {
            if state.tasks.contains_key(&task.id()) || !batch_ids.insert(task.id()) {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
        }
        for task in tasks {
            state.insert(task);
        }
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.task = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn list_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut stored: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| stored.task.trip_id() == trip_id)
            .collect();
        stored.sort_by_key(|entry| entry.sequence);
        Ok(stored.into_iter().map(|entry| entry.task.clone()).collect())
    }

    async fn delete_generated_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<usize> {
        let mut state = self.write()?;
        Ok(state.remove_where(|task| task.trip_id() == trip_id && task.origin().is_generated()))
    }

    async fn replace_generated_for_trip(
        &self,
        trip_id: TripId,
        tasks: &[Task],
    ) -> TaskRepositoryResult<usize> {
        let mut state = self.write()?;
        let mut batch_ids = HashSet::new();
        for task in tasks {
            let clashes = state.tasks.get(&task.id()).is_some_and(|stored| {
                stored.task.trip_id() != trip_id || !stored.task.origin().is_generated()
            });
            if clashes || !batch_ids.insert(task.id()) {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
        }
        let removed =
            state.remove_where(|task| task.trip_id() == trip_id && task.origin().is_generated());
        for task in tasks {
            state.insert(task);
        }
        Ok(removed)
    }

    async fn delete_all_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<usize> {
        let mut state = self.write()?;
        Ok(state.remove_where(|task| task.trip_id() == trip_id))
    }
}
