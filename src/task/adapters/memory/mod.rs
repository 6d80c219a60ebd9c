//! In-memory checklist task adapter.

mod task;

pub use task::InMemoryTaskRepository;
