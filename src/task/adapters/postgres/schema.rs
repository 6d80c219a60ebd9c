//! Diesel schema for checklist task persistence.

diesel::table! {
    /// Checklist tasks attached to trips.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Insertion sequence used for creation ordering.
        seq -> Int8,
        /// Owning trip.
        trip_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Date>,
        /// Completion flag.
        completed -> Bool,
        /// Optional free-text comments.
        comments -> Nullable<Text>,
        /// `true` for rule-generated tasks.
        auto -> Bool,
        /// Visibility flag.
        visible -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
