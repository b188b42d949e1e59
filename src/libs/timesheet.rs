//! Timesheet input model.
//!
//! A timesheet is a YAML file describing one matter's work log:
//!
//! ```yaml
//! matter: "Smith v. Jones"
//! rate: 250
//! entries:
//!   - date: 2024-01-15
//!     start_time: "09:00"
//!     end_time: "11:30"
//!     description: "Draft motion"
//!   - date: 2024-01-16
//!     duration_hours: 1.5
//!     billed: false
//! ```
//!
//! Each entry carries either a start/end time pair or an explicit duration,
//! never both shapes and never neither. Structural problems (missing
//! `matter`, missing `entries`) surface at load time as `Validation`
//! failures; the per-entry shape invariant is checked by the transformer.

use crate::libs::error::PaymoError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TimesheetEntry {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billed: Option<bool>,
    /// Per-entry IANA timezone override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Per-entry task override; otherwise the resolved matter task is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
}

impl TimesheetEntry {
    /// True when the entry is described by a start/end wall-clock range.
    pub fn has_time_range(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Timesheet {
    pub matter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    pub entries: Vec<TimesheetEntry>,
}

impl Timesheet {
    /// Parses a timesheet from YAML text.
    pub fn from_str(content: &str) -> Result<Self, PaymoError> {
        let timesheet: Timesheet =
            serde_yaml::from_str(content).map_err(|e| PaymoError::Validation(format!("failed to parse timesheet: {}", e)))?;

        if timesheet.entries.is_empty() {
            return Err(PaymoError::Validation("timesheet has no entries".to_string()));
        }
        if timesheet.matter.trim().is_empty() {
            return Err(PaymoError::Validation("timesheet must specify a 'matter' field".to_string()));
        }

        Ok(timesheet)
    }

    /// Loads and validates a timesheet YAML file.
    pub fn load(path: &Path) -> Result<Self, PaymoError> {
        let content =
            fs::read_to_string(path).map_err(|e| PaymoError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }
}
