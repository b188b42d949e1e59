//! Conversion of timesheet entries into the provider's wire shape.
//!
//! The provider accepts either a UTC start/end pair or a date plus an
//! integer duration in seconds. Wall-clock times in the timesheet are
//! interpreted in the entry's timezone (falling back to the config default),
//! localized, and converted to UTC. A wall-clock that does not exist in the
//! target zone (DST spring-forward) or maps to two instants (fall-back) is
//! rejected rather than silently picked.

use crate::libs::error::PaymoError;
use crate::libs::timesheet::TimesheetEntry;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Wire format for entry creation. Exactly one of the two time shapes is
/// populated; `None` fields are omitted from the JSON body.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiEntry {
    pub task_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Duration in whole seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billed: Option<bool>,
}

/// Resolves an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, PaymoError> {
    name.parse::<Tz>().map_err(|_| PaymoError::Validation(format!("unknown timezone '{}'", name)))
}

fn parse_wall_clock(time: &str) -> Result<NaiveTime, PaymoError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| PaymoError::Validation(format!("invalid time '{}', expected HH:MM", time)))
}

/// Converts a local date + wall-clock time in `tz` to a UTC ISO-8601 string
/// (`YYYY-MM-DDTHH:MM:SSZ`).
pub fn convert_to_utc(date: NaiveDate, time: &str, tz: Tz) -> Result<String, PaymoError> {
    let naive = date.and_time(parse_wall_clock(time)?);
    let local = tz.from_local_datetime(&naive).single().ok_or_else(|| {
        PaymoError::Validation(format!("local time {} {} is ambiguous or nonexistent in {}", date, time, tz))
    })?;
    Ok(local.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Timezone used for an entry: its own override, else the config default.
fn entry_timezone(entry: &TimesheetEntry, default_tz: &str) -> Result<Tz, PaymoError> {
    parse_timezone(entry.timezone.as_deref().unwrap_or(default_tz))
}

/// Transforms one timesheet entry into the provider's wire shape.
///
/// The entry must carry exactly one time shape: a start/end range (converted
/// to UTC instants) or an explicit hour count (rounded to whole seconds).
/// Description, billed flag, and a per-entry task override pass through.
pub fn to_api_entry(entry: &TimesheetEntry, default_task_id: i64, default_tz: &str) -> Result<ApiEntry, PaymoError> {
    let mut api_entry = ApiEntry {
        task_id: entry.task_id.unwrap_or(default_task_id),
        start_time: None,
        end_time: None,
        date: None,
        duration: None,
        description: entry.description.clone(),
        billed: entry.billed,
    };

    match (&entry.start_time, &entry.end_time, entry.duration_hours) {
        (Some(start), Some(end), None) => {
            let tz = entry_timezone(entry, default_tz)?;
            api_entry.start_time = Some(convert_to_utc(entry.date, start, tz)?);
            api_entry.end_time = Some(convert_to_utc(entry.date, end, tz)?);
        }
        (None, None, Some(hours)) => {
            api_entry.date = Some(entry.date.format("%Y-%m-%d").to_string());
            api_entry.duration = Some((hours * 3600.0).round() as i64);
        }
        _ => {
            return Err(PaymoError::Validation(format!(
                "entry for {} must have either (start_time, end_time) or duration_hours",
                entry.date
            )));
        }
    }

    Ok(api_entry)
}

/// Duration of an entry in hours, for previews and totals.
///
/// Explicit hours are used as-is; ranges are localized before subtraction so
/// a range spanning a DST transition reports elapsed time, not wall-clock
/// difference.
pub fn entry_duration_hours(entry: &TimesheetEntry, default_tz: &str) -> Result<f64, PaymoError> {
    if let Some(hours) = entry.duration_hours {
        return Ok(hours);
    }

    match (&entry.start_time, &entry.end_time) {
        (Some(start), Some(end)) => {
            let tz = entry_timezone(entry, default_tz)?;
            let start = tz
                .from_local_datetime(&entry.date.and_time(parse_wall_clock(start)?))
                .single()
                .ok_or_else(|| PaymoError::Validation(format!("ambiguous start time for {}", entry.date)))?;
            let end = tz
                .from_local_datetime(&entry.date.and_time(parse_wall_clock(end)?))
                .single()
                .ok_or_else(|| PaymoError::Validation(format!("ambiguous end time for {}", entry.date)))?;
            Ok((end - start).num_seconds() as f64 / 3600.0)
        }
        _ => Err(PaymoError::Validation(format!(
            "entry for {} must have either (start_time, end_time) or duration_hours",
            entry.date
        ))),
    }
}
