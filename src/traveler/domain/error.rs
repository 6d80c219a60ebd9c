//! Error types for traveler profile validation.

use crate::reference::domain::InvalidCountryName;
use thiserror::Error;

/// Errors returned while constructing traveler profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TravelerDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains whitespace.
    #[error("username '{0}' must not contain whitespace")]
    InvalidUsername(String),

    /// The username exceeds the 150-character storage limit.
    #[error("username exceeds 150 character limit: {0}")]
    UsernameTooLong(String),

    /// A profile was created without any nationality.
    #[error("a traveler profile needs at least one nationality")]
    NoNationality,

    /// The phone number is malformed.
    #[error("invalid phone number '{0}'")]
    InvalidPhone(String),

    /// The postal address exceeds the 255-character storage limit.
    #[error("address exceeds 255 character limit")]
    AddressTooLong,

    /// A country name is invalid.
    #[error(transparent)]
    Country(#[from] InvalidCountryName),
}
