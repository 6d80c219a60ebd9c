//! Error types for reference data validation.

use thiserror::Error;

/// Error returned when a country name fails validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidCountryName {
    /// The name is empty after trimming.
    #[error("country name must not be empty")]
    Empty,

    /// The name exceeds the 255-character storage limit.
    #[error("country name exceeds 255 character limit: {0}")]
    TooLong(String),
}

/// Errors returned while constructing reference data values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReferenceDomainError {
    /// A country name is invalid.
    #[error(transparent)]
    CountryName(#[from] InvalidCountryName),

    /// A vaccine category is empty after trimming.
    #[error("vaccine category must not be empty")]
    EmptyVaccineCategory,

    /// A climate description is empty after trimming.
    #[error("climate description for {0} must not be empty")]
    EmptyClimateDescription(String),

    /// A union name is empty after trimming.
    #[error("country union name must not be empty")]
    EmptyUnionName,

    /// A union name exceeds the maximum length.
    #[error("country union name exceeds {max} characters: {length}")]
    UnionNameTooLong {
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected name.
        length: usize,
    },
}
