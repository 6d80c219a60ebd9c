//! Adapter implementations for checklist task ports.

pub mod memory;
pub mod postgres;
