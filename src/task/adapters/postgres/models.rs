//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Row for `tasks`, used for reads and inserts.
///
/// `seq` is assigned by the database and only used for ordering.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning trip.
    pub trip_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional deadline.
    pub deadline: Option<NaiveDate>,
    /// Completion flag.
    pub completed: bool,
    /// Optional comments.
    pub comments: Option<String>,
    /// Generated-task flag.
    pub auto: bool,
    /// Visibility flag.
    pub visible: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
