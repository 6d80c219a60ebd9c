//! Tunable thresholds used by the checklist rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds applied by [`super::TaskFactory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistRules {
    /// Days before departure by which vaccines should be checked.
    pub vaccine_lead_days: u32,
    /// Stays longer than this many days get the long-travel task.
    pub long_stay_days: u32,
    /// Flights longer than this many hours get the long-flight advice.
    pub long_flight_hours: u32,
}

impl Default for ChecklistRules {
    fn default() -> Self {
        Self {
            vaccine_lead_days: 45,
            long_stay_days: 14,
            long_flight_hours: 2,
        }
    }
}

/// Rejected threshold value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("checklist threshold `{field}` must be between 1 and {max}, got {value}")]
pub struct InvalidChecklistRules {
    /// Offending field name.
    pub field: &'static str,
    /// Rejected value.
    pub value: u32,
    /// Largest accepted value.
    pub max: u32,
}

impl ChecklistRules {
    /// Checks every threshold is within a sensible range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChecklistRules`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), InvalidChecklistRules> {
        check("vaccine_lead_days", self.vaccine_lead_days, 365)?;
        check("long_stay_days", self.long_stay_days, 365)?;
        check("long_flight_hours", self.long_flight_hours, 48)
    }
}

const fn check(field: &'static str, value: u32, max: u32) -> Result<(), InvalidChecklistRules> {
    if value == 0 || value > max {
        return Err(InvalidChecklistRules { field, value, max });
    }
    Ok(())
}
