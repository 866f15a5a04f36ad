//! Schedule (contract vehicle) metadata.

use serde::{Deserialize, Serialize};

/// Metadata describing one schedule, as served by `/schedules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Schedule identifier; empty string is the "no specific schedule" entry
    pub schedule: String,

    /// SIN number (may be empty)
    #[serde(default)]
    pub sin: String,

    /// User-facing name
    pub full_name: String,
}

impl ScheduleMetadata {
    /// Label for a schedule picker.
    pub fn label(&self) -> String {
        if self.sin.is_empty() {
            self.full_name.clone()
        } else {
            format!("{} - {}", self.sin, self.full_name)
        }
    }

    /// Whether this entry stands for "any schedule".
    pub fn is_any(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Look up a schedule by identifier.
pub fn find_schedule<'a>(
    schedules: &'a [ScheduleMetadata],
    schedule: &str,
) -> Option<&'a ScheduleMetadata> {
    schedules.iter().find(|meta| meta.schedule == schedule)
}
