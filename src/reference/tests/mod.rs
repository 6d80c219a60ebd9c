//! Unit tests for the reference data module.
