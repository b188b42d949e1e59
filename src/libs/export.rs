//! CSV timesheet export and invoice reconciliation.
//!
//! Two export paths share one rendering pipeline:
//!
//! - **Range export**: all entries in a date range, optionally filtered by
//!   project.
//! - **Invoice export**: exactly the entries billed on one invoice,
//!   determined by intersecting the invoice's line-item ids with entries
//!   fetched over a 90-day lookback window ending at the invoice date.
//!   Entries billed outside that window are not found; the window is a
//!   deliberate trade against walking the full entry history.
//!
//! Rendering sorts entries ascending by start time (date, then zero-padded
//! id as fallbacks), resolves task names one lookup at a time with a fixed
//! inter-call delay, strips HTML from descriptions, and emits a fixed
//! seven-column CSV plus the entry id.

use crate::api::{Entry, Paymo};
use crate::libs::backoff::{Sleeper, TASK_FETCH_DELAY_SECS, TASK_FETCH_RETRY_SECS};
use crate::libs::error::PaymoError;
use crate::libs::formatter::format_hours;
use crate::libs::messages::Message;
use crate::libs::sanitize::clean_description;
use crate::msg_warning;
use chrono::{Duration, Local, NaiveDate};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Exact column set of every exported CSV.
pub const CSV_HEADER: [&str; 8] = [
    "Date",
    "Start Time",
    "End Time",
    "Duration (hours)",
    "Task",
    "Description",
    "Billed",
    "Entry ID",
];

/// Days searched backwards from the invoice date when reconciling entries
/// against invoice line items.
pub const INVOICE_LOOKBACK_DAYS: i64 = 90;

pub struct EntryExporter<'a, S: Sleeper> {
    client: &'a Paymo,
    sleeper: &'a S,
}

impl<'a, S: Sleeper> EntryExporter<'a, S> {
    pub fn new(client: &'a Paymo, sleeper: &'a S) -> Self {
        Self { client, sleeper }
    }

    /// Exports all entries in `[start, end]` as CSV text, optionally
    /// filtered to one project.
    pub async fn export_range(&self, start: NaiveDate, end: NaiveDate, project_id: Option<i64>) -> Result<String, PaymoError> {
        let mut entries = self.client.get_entries(Some(start), Some(end)).await?;
        if let Some(project_id) = project_id {
            entries.retain(|entry| entry.project_id == Some(project_id));
        }
        self.render_csv(entries).await
    }

    /// Exports exactly the entries billed on `invoice_id` as CSV text.
    /// An invoice with no line items yields a header-only CSV.
    pub async fn export_invoice(&self, invoice_id: i64) -> Result<String, PaymoError> {
        let invoice = self.client.get_invoice(invoice_id, true).await?;
        let item_ids: HashSet<i64> = invoice.invoiceitems.unwrap_or_default().iter().map(|item| item.id).collect();

        if item_ids.is_empty() {
            return self.render_csv(Vec::new()).await;
        }

        let end = invoice
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive());
        let start = end - Duration::days(INVOICE_LOOKBACK_DAYS);

        let mut entries = self.client.get_entries(Some(start), Some(end)).await?;
        entries.retain(|entry| entry.invoice_item_id.map(|id| item_ids.contains(&id)).unwrap_or(false));

        self.render_csv(entries).await
    }

    async fn render_csv(&self, mut entries: Vec<Entry>) -> Result<String, PaymoError> {
        entries.sort_by_key(sort_key);
        let task_names = self.task_names(&entries).await;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER).map_err(csv_error)?;

        for entry in &entries {
            let task_name = entry.task_id.and_then(|id| task_names.get(&id).cloned()).unwrap_or_default();
            let description = entry.description.as_deref().map(clean_description).unwrap_or_default();
            let duration_hours = entry.duration_seconds() as f64 / 3600.0;

            writer
                .write_record(&[
                    entry.date.clone().unwrap_or_default(),
                    entry.start_time.clone().unwrap_or_default(),
                    entry.end_time.clone().unwrap_or_default(),
                    format_hours(duration_hours),
                    task_name,
                    description,
                    if entry.billed.unwrap_or(false) { "Yes".to_string() } else { "No".to_string() },
                    entry.id.to_string(),
                ])
                .map_err(csv_error)?;
        }

        let bytes = writer.into_inner().map_err(|e| PaymoError::Validation(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PaymoError::Validation(e.to_string()))
    }

    /// Fetches the name of every distinct task referenced by `entries`.
    ///
    /// Lookups are serialized with a fixed delay; a 429 earns one retry
    /// after a longer wait. A task that still cannot be fetched gets a
    /// blank name and a console warning — export never fails over a name.
    pub async fn task_names(&self, entries: &[Entry]) -> HashMap<i64, String> {
        let task_ids: BTreeSet<i64> = entries.iter().filter_map(|entry| entry.task_id).collect();
        let mut cache = HashMap::new();

        for task_id in task_ids {
            self.sleeper.sleep_secs(TASK_FETCH_DELAY_SECS).await;

            let name = match self.client.get_task(task_id).await {
                Ok(task) => Some(task.name),
                Err(PaymoError::RateLimited(_)) => {
                    msg_warning!(Message::TaskFetchRetry(TASK_FETCH_RETRY_SECS));
                    self.sleeper.sleep_secs(TASK_FETCH_RETRY_SECS).await;
                    match self.client.get_task(task_id).await {
                        Ok(task) => Some(task.name),
                        Err(error) => {
                            msg_warning!(Message::TaskFetchFailed {
                                task_id,
                                error: error.to_string()
                            });
                            None
                        }
                    }
                }
                Err(error) => {
                    msg_warning!(Message::TaskFetchFailed {
                        task_id,
                        error: error.to_string()
                    });
                    None
                }
            };

            cache.insert(task_id, name.unwrap_or_default());
        }

        cache
    }
}

/// Sort key for export ordering: start time when present, else the entry
/// date. Entries with neither sort after everything dated, ordered among
/// themselves by zero-padded id so the order stays total.
pub fn sort_key(entry: &Entry) -> (u8, String) {
    if let Some(start) = &entry.start_time {
        (0, start.clone())
    } else if let Some(date) = &entry.date {
        (0, date.clone())
    } else {
        (1, format!("{:0>20}", entry.id))
    }
}

/// File name for an invoice export: the invoice number with `#` dropped and
/// `/` replaced, falling back to the invoice id.
pub fn invoice_csv_filename(number: Option<&str>, invoice_id: i64) -> String {
    let number = number.map(str::to_string).unwrap_or_else(|| format!("INV-{}", invoice_id));
    format!("{}_timesheet.csv", number.replace('#', "").replace('/', "-"))
}

fn csv_error(e: csv::Error) -> PaymoError {
    PaymoError::Validation(format!("CSV write failed: {}", e))
}
