//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing or editing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the maximum length.
    #[error("task title is {0} characters long, the maximum is 255")]
    TitleTooLong(usize),
}
