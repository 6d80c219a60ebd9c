//! Adapter implementations for traveler profile ports.

pub mod memory;
pub mod postgres;
