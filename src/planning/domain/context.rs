//! Everything the checklist rules may consult about a trip.

use crate::reference::domain::{Climate, Country, CountryUnion};
use crate::trip::domain::Trip;

/// A trip together with the reference data found for its countries.
///
/// Absent records are `None` or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningContext {
    trip: Trip,
    departure_country: Option<Country>,
    arrival_country: Option<Country>,
    arrival_climate: Option<Climate>,
    departure_unions: Vec<CountryUnion>,
    arrival_unions: Vec<CountryUnion>,
}

impl PlanningContext {
    /// Creates a context with no reference data.
    #[must_use]
    pub const fn new(trip: Trip) -> Self {
        Self {
            trip,
            departure_country: None,
            arrival_country: None,
            arrival_climate: None,
            departure_unions: Vec::new(),
            arrival_unions: Vec::new(),
        }
    }

    /// Sets the departure country record.
    #[must_use]
    pub fn with_departure_country(mut self, country: Option<Country>) -> Self {
        self.departure_country = country;
        self
    }

    /// Sets the arrival country record.
    #[must_use]
    pub fn with_arrival_country(mut self, country: Option<Country>) -> Self {
        self.arrival_country = country;
        self
    }

    /// Sets the arrival climate record.
    #[must_use]
    pub fn with_arrival_climate(mut self, climate: Option<Climate>) -> Self {
        self.arrival_climate = climate;
        self
    }

    /// Sets the unions listing the departure country.
    #[must_use]
    pub fn with_departure_unions(mut self, unions: Vec<CountryUnion>) -> Self {
        self.departure_unions = unions;
        self
    }

    /// Sets the unions listing the arrival country.
    #[must_use]
    pub fn with_arrival_unions(mut self, unions: Vec<CountryUnion>) -> Self {
        self.arrival_unions = unions;
        self
    }

    /// Returns the trip.
    #[must_use]
    pub const fn trip(&self) -> &Trip {
        &self.trip
    }

    /// Returns the departure country record, if known.
    #[must_use]
    pub const fn departure_country(&self) -> Option<&Country> {
        self.departure_country.as_ref()
    }

    /// Returns the arrival country record, if known.
    #[must_use]
    pub const fn arrival_country(&self) -> Option<&Country> {
        self.arrival_country.as_ref()
    }

    /// Returns the arrival climate record, if known.
    #[must_use]
    pub const fn arrival_climate(&self) -> Option<&Climate> {
        self.arrival_climate.as_ref()
    }

    /// Returns the unions listing the departure country.
    #[must_use]
    pub fn departure_unions(&self) -> &[CountryUnion] {
        &self.departure_unions
    }

    /// Returns the unions listing the arrival country.
    #[must_use]
    pub fn arrival_unions(&self) -> &[CountryUnion] {
        &self.arrival_unions
    }
}
