//! In-memory traveler profile adapter.

mod profile;

pub use profile::InMemoryTravelerRepository;
