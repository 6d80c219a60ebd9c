//! Unit tests for checklist generation.
