//! Diesel schema for traveler profile persistence.

diesel::table! {
    /// Traveler profiles.
    travelers (id) {
        /// Traveler identifier.
        id -> Uuid,
        /// Unique username.
        #[max_length = 150]
        username -> Varchar,
        /// Nationalities as a JSON array of country names.
        nationalities -> Jsonb,
        /// Country of residence.
        #[max_length = 255]
        residence_country -> Varchar,
        /// Birth date.
        birth_date -> Nullable<Date>,
        /// Postal address.
        #[max_length = 255]
        address -> Nullable<Varchar>,
        /// Phone number.
        #[max_length = 20]
        phone -> Nullable<Varchar>,
        /// Visited countries as a JSON array of country names.
        visited_countries -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
