//! Diesel schema for reference data persistence.

diesel::table! {
    /// Country reference records keyed by normalised name.
    reference_countries (name_key) {
        /// Lower-cased lookup key.
        #[max_length = 255]
        name_key -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Whether malaria is present.
        malaria_presence -> Bool,
        /// Travel-advisory level, if known.
        advisory_level -> Nullable<Int2>,
        /// Recommended vaccines as a JSON array.
        vaccines -> Jsonb,
    }
}

diesel::table! {
    /// Climate descriptions keyed by normalised country name.
    reference_climates (country_key) {
        /// Lower-cased country lookup key.
        #[max_length = 255]
        country_key -> Varchar,
        /// Country display name.
        #[max_length = 255]
        country -> Varchar,
        /// Climate description.
        description -> Text,
    }
}

diesel::table! {
    /// Country unions keyed by normalised union name.
    reference_unions (name_key) {
        /// Lower-cased union key.
        #[max_length = 255]
        name_key -> Varchar,
        /// Union display name.
        #[max_length = 255]
        name -> Varchar,
        /// Member country names as a JSON array.
        members -> Jsonb,
        /// Whether members need a visa to visit each other.
        visa_required_between_members -> Bool,
        /// Whether the union issues a common visa.
        common_visa -> Bool,
    }
}
