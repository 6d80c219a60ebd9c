//! Adapter implementations for reference data ports.

pub mod memory;
pub mod postgres;
pub mod seed_file;
