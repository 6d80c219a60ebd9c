//! Domain model for checklist tasks.
//!
//! Tasks carry no infrastructure concerns; their origin decides whether a
//! batch regeneration may remove them.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskEdit, TaskOrigin};
