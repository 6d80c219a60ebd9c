//! Orchestration services for trips and segments.

mod itinerary;

pub use itinerary::{
    AddSegmentRequest, CreateTripRequest, EndpointRequest, ItineraryError, ItineraryResult,
    ItineraryService, RescheduleRequest,
};
