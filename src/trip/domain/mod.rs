//! Domain model for trips and segments.

mod endpoint;
mod error;
mod ids;
mod segment;
mod trip;

pub use endpoint::{AirportCode, Endpoint};
pub use error::TripDomainError;
pub use ids::{SegmentId, TripId};
pub use segment::{PersistedSegmentData, Segment, SegmentOrder};
pub use trip::{PersistedTripData, Trip};
