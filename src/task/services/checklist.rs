//! Service layer for the traveler's own checklist operations.

use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskEdit, TaskId, TaskOrigin},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::trip::{
    domain::TripId,
    ports::{TripRepository, TripRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for a traveler-authored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    trip_id: TripId,
    draft: TaskDraft,
}

impl AddTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(trip_id: TripId, title: impl Into<String>) -> Self {
        Self {
            trip_id,
            draft: TaskDraft::new(title),
        }
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.draft = self.draft.with_comments(comments);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.draft = self.draft.with_deadline(deadline);
        self
    }
}

/// Service-level errors for checklist operations.
#[derive(Debug, Error)]
pub enum ChecklistError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Trip lookup failed.
    #[error(transparent)]
    Trip(#[from] TripRepositoryError),
}

/// Result type for checklist service operations.
pub type ChecklistResult<T> = Result<T, ChecklistError>;

/// Checklist orchestration service for traveler-facing task edits.
#[derive(Clone)]
pub struct ChecklistService<K, R, C>
where
    K: TaskRepository,
    R: TripRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<K>,
    trips: Arc<R>,
    clock: Arc<C>,
}

impl<K, R, C> ChecklistService<K, R, C>
where
    K: TaskRepository,
    R: TripRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new checklist service.
    #[must_use]
    pub const fn new(tasks: Arc<K>, trips: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            trips,
            clock,
        }
    }

    /// Adds a traveler-authored task to an existing trip.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Trip`] when the trip does not exist,
    /// [`ChecklistError::Domain`] when the title is invalid, or
    /// [`ChecklistError::Repository`] when persistence fails.
    pub async fn add_task(&self, request: AddTaskRequest) -> ChecklistResult<Task> {
        let AddTaskRequest { trip_id, draft } = request;
        if self.trips.find_by_id(trip_id).await?.is_none() {
            return Err(TripRepositoryError::NotFound(trip_id).into());
        }

        let task = Task::from_draft(trip_id, draft, TaskOrigin::Traveler, &*self.clock)?;
        self.tasks.store(&task).await?;
        debug!(trip_id = %trip_id, task_id = %task.id(), "traveler task added");
        Ok(task)
    }

    /// Applies a partial edit to a task.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Domain`] when the new title is invalid or
    /// [`ChecklistError::Repository`] when the task does not exist.
    pub async fn edit_task(&self, id: TaskId, edit: TaskEdit) -> ChecklistResult<Task> {
        let mut task = self.require_task(id).await?;
        task.edit(edit, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Marks a task as done.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn complete(&self, id: TaskId) -> ChecklistResult<Task> {
        self.modify(id, |task, clock| task.complete(clock)).await
    }

    /// Marks a task as not done.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn reopen(&self, id: TaskId) -> ChecklistResult<Task> {
        self.modify(id, |task, clock| task.reopen(clock)).await
    }

    /// Shows or hides a task.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn set_visibility(&self, id: TaskId, visible: bool) -> ChecklistResult<Task> {
        self.modify(id, |task, clock| task.set_visibility(visible, clock))
            .await
    }

    /// Deletes a task, whatever its origin.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> ChecklistResult<()> {
        Ok(self.tasks.delete(id).await?)
    }

    /// Returns every task of a trip in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Repository`] when lookup fails.
    pub async fn tasks_for_trip(&self, trip_id: TripId) -> ChecklistResult<Vec<Task>> {
        Ok(self.tasks.list_for_trip(trip_id).await?)
    }

    /// Returns the tasks of a trip the traveler has not hidden.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::Repository`] when lookup fails.
    pub async fn visible_tasks_for_trip(&self, trip_id: TripId) -> ChecklistResult<Vec<Task>> {
        let mut tasks = self.tasks.list_for_trip(trip_id).await?;
        tasks.retain(Task::is_visible);
        Ok(tasks)
    }

    async fn modify(
        &self,
        id: TaskId,
        change: impl FnOnce(&mut Task, &C) + Send,
    ) -> ChecklistResult<Task> {
        let mut task = self.require_task(id).await?;
        change(&mut task, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    async fn require_task(&self, id: TaskId) -> ChecklistResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(ChecklistError::Repository(TaskRepositoryError::NotFound(id)))
    }
}
