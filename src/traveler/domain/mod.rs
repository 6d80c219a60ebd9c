//! Domain model for traveler profiles.

mod contact;
mod error;
mod ids;
mod profile;

pub use contact::PhoneNumber;
pub use error::TravelerDomainError;
pub use ids::{TravelerId, Username};
pub use profile::{PersistedProfileData, TravelerProfile};
