//! Task aggregate root and related checklist types.

use super::{TaskDomainError, TaskId, TaskTitle};
use crate::trip::domain::TripId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Who created a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOrigin {
    /// Produced by the checklist rules; replaced on regeneration.
    Generated,
    /// Written by the traveler; never touched by regeneration.
    Traveler,
}

impl TaskOrigin {
    /// Returns `true` for rule-generated tasks.
    #[must_use]
    pub const fn is_generated(self) -> bool {
        matches!(self, Self::Generated)
    }

    /// Maps the persisted `auto` flag back to an origin.
    #[must_use]
    pub const fn from_generated_flag(generated: bool) -> Self {
        if generated {
            Self::Generated
        } else {
            Self::Traveler
        }
    }
}

/// Unsaved task content as emitted by a checklist rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Free-text advice, if any.
    pub comments: Option<String>,
    /// Date by which the task should be done, if any.
    pub deadline: Option<NaiveDate>,
}

impl TaskDraft {
    /// Creates a draft with a title only.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            comments: None,
            deadline: None,
        }
    }

    /// Sets the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Partial edit of a task's content.
///
/// `None` leaves a field unchanged; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    title: Option<String>,
    deadline: Option<Option<NaiveDate>>,
    comments: Option<Option<String>>,
}

impl TaskEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<NaiveDate>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Replaces or clears the comments.
    #[must_use]
    pub fn with_comments(mut self, comments: Option<String>) -> Self {
        self.comments = Some(comments);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    trip_id: TripId,
    title: TaskTitle,
    deadline: Option<NaiveDate>,
    completed: bool,
    comments: Option<String>,
    origin: TaskOrigin,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning trip.
    pub trip_id: TripId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted deadline, if any.
    pub deadline: Option<NaiveDate>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted comments, if any.
    pub comments: Option<String>,
    /// Persisted origin.
    pub origin: TaskOrigin,
    /// Persisted visibility flag.
    pub visible: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an open, visible task on `trip_id` from a draft.
    ///
    /// Blank comments are stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the draft title is invalid.
    pub fn from_draft(
        trip_id: TripId,
        draft: TaskDraft,
        origin: TaskOrigin,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let TaskDraft {
            title,
            comments,
            deadline,
        } = draft;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            trip_id,
            title: TaskTitle::new(title)?,
            deadline,
            completed: false,
            comments: normalize_comments(comments),
            origin,
            visible: true,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            trip_id: data.trip_id,
            title: data.title,
            deadline: data.deadline,
            completed: data.completed,
            comments: data.comments,
            origin: data.origin,
            visible: data.visible,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning trip.
    #[must_use]
    pub const fn trip_id(&self) -> TripId {
        self.trip_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Returns `true` once the traveler has ticked the task off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the comments, if any.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns the task origin.
    #[must_use]
    pub const fn origin(&self) -> TaskOrigin {
        self.origin
    }

    /// Returns `false` when the traveler has hidden the task.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the task as done.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.completed = true;
        self.touch(clock);
    }

    /// Marks the task as not done.
    pub fn reopen(&mut self, clock: &impl Clock) {
        self.completed = false;
        self.touch(clock);
    }

    /// Shows or hides the task.
    pub fn set_visibility(&mut self, visible: bool, clock: &impl Clock) {
        self.visible = visible;
        self.touch(clock);
    }

    /// Applies a partial edit.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the new title is invalid; the task
    /// is left untouched in that case.
    pub fn edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let TaskEdit {
            title,
            deadline,
            comments,
        } = edit;
        let new_title = title.map(TaskTitle::new).transpose()?;

        if let Some(value) = new_title {
            self.title = value;
        }
        if let Some(value) = deadline {
            self.deadline = value;
        }
        if let Some(value) = comments {
            self.comments = normalize_comments(value);
        }
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_comments(comments: Option<String>) -> Option<String> {
    comments.filter(|value| !value.trim().is_empty())
}
