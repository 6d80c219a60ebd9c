//! In-memory trip adapter.

mod itinerary;

pub use itinerary::InMemoryTripRepository;
