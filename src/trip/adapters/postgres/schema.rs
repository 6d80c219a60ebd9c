//! Diesel schema for trip persistence.

diesel::table! {
    /// Trips owned by travelers.
    trips (id) {
        /// Trip identifier.
        id -> Uuid,
        /// Owning traveler.
        traveler_id -> Uuid,
        /// Departure country name.
        #[max_length = 255]
        departure_country -> Varchar,
        /// Departure airport code.
        #[max_length = 3]
        departure_airport -> Varchar,
        /// Departure time.
        departure_at -> Timestamptz,
        /// Arrival country name.
        #[max_length = 255]
        arrival_country -> Varchar,
        /// Arrival airport code.
        #[max_length = 3]
        arrival_airport -> Varchar,
        /// Arrival time.
        arrival_at -> Timestamptz,
        /// Optional return time.
        return_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered legs of a trip.
    trip_segments (id) {
        /// Segment identifier.
        id -> Uuid,
        /// Owning trip.
        trip_id -> Uuid,
        /// Departure country name.
        #[max_length = 255]
        departure_country -> Varchar,
        /// Departure airport code.
        #[max_length = 3]
        departure_airport -> Varchar,
        /// Departure time.
        departure_at -> Timestamptz,
        /// Arrival country name.
        #[max_length = 255]
        arrival_country -> Varchar,
        /// Arrival airport code.
        #[max_length = 3]
        arrival_airport -> Varchar,
        /// Arrival time.
        arrival_at -> Timestamptz,
        /// Position within the trip, unique per trip.
        position -> Int4,
    }
}
