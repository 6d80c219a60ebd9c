//! In-memory reference data adapter.
//!
//! Used by the `plan` command and by tests that do not need a database.

mod catalog;

pub use catalog::InMemoryCountryCatalog;
