//! Step definitions for trip checklist scenarios.

mod given;
mod then;
mod when;
pub mod world;
