//! Adapter implementations for trip ports.

pub mod memory;
pub mod postgres;
