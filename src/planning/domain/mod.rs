//! Pure checklist rules.

mod context;
mod factory;
mod rules;

pub use context::PlanningContext;
pub use factory::TaskFactory;
pub use rules::{ChecklistRules, InvalidChecklistRules};
