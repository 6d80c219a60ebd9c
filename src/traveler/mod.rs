//! Traveler profiles.
//!
//! A profile records who travels: nationalities, country of residence,
//! contact details and the countries already visited. Trips reference their
//! traveler by [`domain::TravelerId`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
