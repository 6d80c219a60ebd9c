//! Country reference data used to tailor trip checklists.
//!
//! Countries, their climates, the unions they belong to and the vaccines
//! recommended for them are read-mostly records consulted by the checklist
//! rule engine. Missing records are expected: reference data is partial and
//! the rule engine falls back to generic advice. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Import services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
