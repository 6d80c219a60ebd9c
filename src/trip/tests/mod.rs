//! Unit tests for the trip module.
