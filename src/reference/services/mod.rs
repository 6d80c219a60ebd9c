//! Application services for reference data maintenance.

mod import;

pub use import::{ImportSummary, ReferenceDataService, ReferenceServiceError};
