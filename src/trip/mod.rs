//! Trips and their flight segments.
//!
//! A trip runs from a departure endpoint to an arrival endpoint, optionally
//! with a return date, and may be split into ordered segments for
//! connecting flights. Segment order is unique within a trip.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
