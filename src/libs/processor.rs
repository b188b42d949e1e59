//! Timesheet submission pipeline.
//!
//! Orchestrates the path from a loaded [`Timesheet`] to acknowledged
//! provider entries: resolve the matter to a project/task pair, transform
//! and validate every entry up front, show a preview with billing totals,
//! confirm, then submit.
//!
//! Submission tries one batched multi-entry call first. If the provider
//! rejects it for any reason, the processor degrades to per-entry creation
//! in original order with a fixed delay between calls; a 429 during the
//! fallback waits out the provider's `Retry-After` and retries that entry
//! exactly once. Entries that still fail are reported and skipped — they
//! never abort their siblings.

use crate::api::Paymo;
use crate::libs::backoff::{Sleeper, INTER_CALL_DELAY_SECS};
use crate::libs::config::Config;
use crate::libs::error::PaymoError;
use crate::libs::formatter::format_hours_clock;
use crate::libs::messages::Message;
use crate::libs::timesheet::{Timesheet, TimesheetEntry};
use crate::libs::transform::{entry_duration_hours, to_api_entry, ApiEntry};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use dialoguer::{theme::ColorfulTheme, Confirm};
use serde_json::Value;

/// One rendered preview line; consumed by [`View::preview`].
pub struct PreviewRow {
    pub date: String,
    pub time: String,
    pub duration: String,
    pub hours: f64,
    pub description: String,
}

pub struct TimesheetProcessor<'a, S: Sleeper> {
    client: &'a Paymo,
    config: &'a Config,
    sleeper: &'a S,
}

impl<'a, S: Sleeper> TimesheetProcessor<'a, S> {
    pub fn new(client: &'a Paymo, config: &'a Config, sleeper: &'a S) -> Self {
        Self { client, config, sleeper }
    }

    /// Resolves a matter name to `(project_id, task_id)`.
    ///
    /// The operator-curated config mapping wins. Otherwise the matter is
    /// matched against the remote project list by case-insensitive
    /// substring; the match must be unambiguous, and the matched project
    /// must have exactly one task. Anything else is an explicit error
    /// rather than a silent first-candidate pick.
    pub async fn resolve_project_task(&self, matter: &str) -> Result<(i64, i64), PaymoError> {
        if let Some(mapping) = self.config.mapping_for(matter) {
            return Ok((mapping.project_id, mapping.task_id));
        }

        let mut candidates = self.client.find_projects_by_name(matter).await?;
        match candidates.len() {
            0 => {
                return Err(PaymoError::NotFound(format!("could not find project matching '{}'", matter)));
            }
            1 => {}
            _ => {
                let names: Vec<&str> = candidates.iter().map(|p| p.name.as_str()).collect();
                return Err(PaymoError::NotFound(format!(
                    "'{}' matches {} projects ({}); add an explicit mapping to the config",
                    matter,
                    names.len(),
                    names.join(", ")
                )));
            }
        }
        let project = candidates.remove(0);

        let tasks = self.client.get_tasks(Some(project.id)).await?;
        let task = match tasks.len() {
            0 => {
                return Err(PaymoError::NotFound(format!("project '{}' has no tasks", project.name)));
            }
            1 => &tasks[0],
            n => {
                return Err(PaymoError::NotFound(format!(
                    "project '{}' has {} tasks; add an explicit mapping for '{}' to the config",
                    project.name, n, matter
                )));
            }
        };

        msg_info!(Message::UsingProject {
            name: project.name.clone(),
            id: project.id
        });
        msg_info!(Message::UsingTask {
            name: task.name.clone(),
            id: task.id
        });

        Ok((project.id, task.id))
    }

    /// Computes the preview table rows and the running hour total.
    pub fn preview_rows(&self, timesheet: &Timesheet) -> Result<(Vec<PreviewRow>, f64), PaymoError> {
        let mut rows = Vec::with_capacity(timesheet.entries.len());
        let mut total_hours = 0.0;

        for entry in &timesheet.entries {
            let hours = entry_duration_hours(entry, &self.config.timezone)?;
            total_hours += hours;

            let time = match (&entry.start_time, &entry.end_time) {
                (Some(start), Some(end)) => format!("{}-{}", start, end),
                _ => "—".to_string(),
            };

            rows.push(PreviewRow {
                date: entry.date.format("%Y-%m-%d").to_string(),
                time,
                duration: format_hours_clock(hours),
                hours,
                description: entry.description.clone().unwrap_or_default(),
            });
        }

        Ok((rows, total_hours))
    }

    /// Renders the preview table and the total (with a billing estimate
    /// when the timesheet carries a rate). Returns the total hours.
    pub fn preview(&self, timesheet: &Timesheet) -> anyhow::Result<f64> {
        let (rows, total_hours) = self.preview_rows(timesheet)?;
        View::preview(&rows).map_err(|e| anyhow::anyhow!(e.to_string()))?;

        match timesheet.rate {
            Some(rate) if rate > 0.0 => {
                msg_print!(
                    Message::TimesheetTotalBilled {
                        hours: total_hours,
                        amount: total_hours * rate,
                        rate,
                    },
                    true
                );
            }
            _ => {
                msg_print!(Message::TimesheetTotal(total_hours), true);
            }
        }

        Ok(total_hours)
    }

    /// Runs the full submission pipeline. Returns the entries the provider
    /// acknowledged as created; entries skipped after a failed retry are
    /// reported on the console only.
    pub async fn submit(&self, timesheet: &Timesheet, dry_run: bool, auto_confirm: bool) -> anyhow::Result<Vec<Value>> {
        msg_print!(Message::ResolvingMatter(timesheet.matter.clone()), true);
        let (_project_id, task_id) = self.resolve_project_task(&timesheet.matter).await?;

        // Any malformed entry aborts the whole file before anything is sent.
        let api_entries: Vec<ApiEntry> = timesheet
            .entries
            .iter()
            .map(|entry| to_api_entry(entry, task_id, &self.config.timezone))
            .collect::<Result<_, _>>()?;

        self.preview(timesheet)?;

        if dry_run {
            msg_warning!(Message::DryRun, true);
            return Ok(Vec::new());
        }

        if auto_confirm {
            msg_success!(Message::AutoConfirmed, true);
        } else {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::ConfirmCreateEntries(api_entries.len()).to_string())
                .interact()?;
            if !confirmed {
                msg_warning!(Message::Cancelled);
                return Ok(Vec::new());
            }
        }

        self.create_entries(&timesheet.entries, &api_entries).await
    }

    /// Creates entries, batch-first with per-entry fallback. Shared by the
    /// CLI submit pipeline and the tool server (which skips preview and
    /// confirmation).
    pub async fn create_entries(&self, entries: &[TimesheetEntry], api_entries: &[ApiEntry]) -> anyhow::Result<Vec<Value>> {
        msg_print!(Message::CreatingBatch(api_entries.len()), true);
        match self.client.create_entries_batch(api_entries).await {
            Ok(result) => {
                msg_success!(Message::BatchCreated(api_entries.len()));
                Ok(unwrap_created(result))
            }
            Err(batch_error) => {
                msg_warning!(Message::BatchFallback(batch_error.to_string()));
                self.submit_individually(entries, api_entries).await
            }
        }
    }

    /// Per-entry fallback: original order, fixed delay between calls, one
    /// bounded retry per entry on 429.
    async fn submit_individually(&self, entries: &[TimesheetEntry], api_entries: &[ApiEntry]) -> anyhow::Result<Vec<Value>> {
        let total = api_entries.len();
        let mut created = Vec::new();

        for (i, (entry, api_entry)) in entries.iter().zip(api_entries).enumerate() {
            msg_print!(Message::CreatingEntry {
                index: i + 1,
                total,
                date: entry.date.format("%Y-%m-%d").to_string(),
            });

            match self.client.create_entry(api_entry).await {
                Ok(result) => {
                    created.push(result);
                    msg_success!(Message::EntryCreated);
                }
                Err(PaymoError::RateLimited(secs)) => {
                    msg_warning!(Message::RateLimitWaiting(secs));
                    self.sleeper.sleep_secs(secs).await;
                    match self.client.create_entry(api_entry).await {
                        Ok(result) => {
                            created.push(result);
                            msg_success!(Message::EntryCreatedAfterRetry);
                        }
                        Err(retry_error) => {
                            msg_error!(Message::EntryRetryFailed(retry_error.to_string()));
                        }
                    }
                }
                Err(error) => {
                    msg_error!(Message::EntryFailed(error.to_string()));
                }
            }

            if i + 1 < total {
                self.sleeper.sleep_secs(INTER_CALL_DELAY_SECS).await;
            }
        }

        msg_success!(Message::EntriesCreated(created.len()), true);
        Ok(created)
    }
}

/// Pulls the created entries out of the provider's response envelope; an
/// unexpected shape is kept whole rather than dropped.
fn unwrap_created(result: Value) -> Vec<Value> {
    match result.get("entries").and_then(Value::as_array) {
        Some(entries) => entries.clone(),
        None if result.is_null() => Vec::new(),
        None => vec![result],
    }
}
