//! Application services for traveler profiles.

mod profile;

pub use profile::{
    CreateProfileRequest, TravelerProfileError, TravelerProfileResult, TravelerProfileService,
};
