//! Orchestration services for checklist tasks.

mod checklist;

pub use checklist::{AddTaskRequest, ChecklistError, ChecklistResult, ChecklistService};
