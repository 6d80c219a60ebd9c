//! Repository port for checklist task persistence.

use crate::task::domain::{Task, TaskId};
use crate::trip::domain::TripId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing operations return tasks in creation order.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Stores a batch of new tasks atomically: either every task is stored
    /// or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when any task ID
    /// already exists.
    async fn store_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task of a trip.
    async fn list_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes the generated tasks of a trip and returns how many were
    /// removed. Traveler-authored tasks are kept.
    async fn delete_generated_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<usize>;

    /// Swaps the generated tasks of a trip for `tasks` in one atomic step
    /// and returns how many generated tasks were removed.
    ///
    /// On error the previous generated tasks are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when a new task ID is
    /// already used by a task that is kept.
    async fn replace_generated_for_trip(
        &self,
        trip_id: TripId,
        tasks: &[Task],
    ) -> TaskRepositoryResult<usize>;

    /// Deletes every task of a trip and returns how many were removed.
    async fn delete_all_for_trip(&self, trip_id: TripId) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning trip does not exist.
    #[error("trip not found: {0}")]
    TripNotFound(TripId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
