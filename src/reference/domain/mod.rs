//! Domain model for country reference data.
//!
//! All values are validated on construction so that adapters and the rule
//! engine can rely on non-empty names and descriptions.

mod climate;
mod country;
mod error;
mod name;
mod seed;
mod union;

pub use climate::Climate;
pub use country::{AdvisoryLevel, Country, Vaccine};
pub use error::{InvalidCountryName, ReferenceDomainError};
pub use name::CountryName;
pub use seed::{ClimateSeed, CountrySeed, ReferenceSeed, UnionSeed, VaccineSeed};
pub use union::CountryUnion;
