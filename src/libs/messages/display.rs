//! Display implementation for application messages.
//!
//! Single source of truth for all user-facing text. Each `Message` variant
//! maps to one formatted string here, so wording changes never touch the
//! call sites and parameters stay type-checked.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let message = match self {
            // === RATE LIMIT MESSAGES ===
            Message::RateLimitLow { remaining, limit, decay } => {
                format!("Rate limit: {}/{} remaining (resets in {}s)", remaining, limit, decay)
            }
            Message::RateLimitExceeded(secs) => format!("Rate limit exceeded! Must wait {}s", secs),
            Message::RateLimitWaiting(secs) => format!("Rate limited, waiting {}s...", secs),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigFileNotFound(path) => {
                format!("Config file not found at {}. Run 'paymo-cli init' or enter the API key when prompted", path)
            }
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigProjectMappings(count) => {
                format!("{} project mapping(s) configured; edit the projects section of the config file to change them", count)
            }
            Message::PromptApiKey => "Paymo API key".to_string(),
            Message::PromptTimezone => "Default timezone (IANA name)".to_string(),

            // === RESOLUTION MESSAGES ===
            Message::ResolvingMatter(matter) => format!("Resolving project for matter: {}", matter),
            Message::UsingProject { name, id } => format!("Using project: {} (ID: {})", name, id),
            Message::UsingTask { name, id } => format!("Using task: {} (ID: {})", name, id),

            // === SUBMISSION MESSAGES ===
            Message::TimesheetTotal(hours) => format!("Total: {:.2} hours", hours),
            Message::TimesheetTotalBilled { hours, amount, rate } => {
                format!("Total: {:.2} hours (${:.2} at ${}/hr)", hours, amount, rate)
            }
            Message::DryRun => "Dry run - no entries created".to_string(),
            Message::ConfirmCreateEntries(count) => format!("Create these {} entries in Paymo?", count),
            Message::Cancelled => "Cancelled".to_string(),
            Message::AutoConfirmed => "Auto-confirmed - proceeding with creation".to_string(),
            Message::CreatingBatch(count) => format!("Creating {} entries in batch...", count),
            Message::BatchCreated(count) => format!("Successfully created {} entries in one API call", count),
            Message::BatchFallback(error) => {
                format!("Batch creation failed, trying individual entries...\nError: {}", error)
            }
            Message::CreatingEntry { index, total, date } => {
                format!("[{}/{}] Creating entry for {}...", index, total, date)
            }
            Message::EntryCreated => "created".to_string(),
            Message::EntryCreatedAfterRetry => "created (after retry)".to_string(),
            Message::EntryRetryFailed(error) => format!("Retry failed: {}", error),
            Message::EntryFailed(error) => format!("Failed: {}", error),
            Message::EntriesCreated(count) => format!("Successfully created {} entries", count),

            // === DELETE MESSAGES ===
            Message::AboutToDeleteEntries(count) => format!("About to delete {} entries:", count),
            Message::EntryToDelete(id) => format!("  - Entry ID: {}", id),
            Message::ConfirmDeleteEntries => "Are you sure you want to delete these entries?".to_string(),
            Message::DeletingEntry(id) => format!("Deleting entry {}...", id),
            Message::DeleteFailed(error) => format!("Delete failed: {}", error),
            Message::EntriesDeleted(count) => format!("Successfully deleted {} entries", count),

            // === EXPORT MESSAGES ===
            Message::ExportingTimesheet { start, end } => format!("Exporting timesheet: {} to {}", start, end),
            Message::ExportProjectFilter(id) => format!("Project ID: {}", id),
            Message::ExportCompleted { path, bytes } => format!("Exported to: {} ({} bytes)", path, bytes),
            Message::ExportingInvoice(number) => format!("Exporting: {}", number),
            Message::InvoicePeriod { start, end } => format!("  Period: {} to {}", start, end),
            Message::InvoiceAmount(total) => format!("  Amount: ${:.2}", total),
            Message::InvoiceExportSaved(path) => format!("  Saved: {}", path),
            Message::InvoiceExportFailed(error) => format!("  Export failed: {}", error),
            Message::InvoiceExportsCompleted(count) => format!("Exported {} invoice timesheets", count),
            Message::TaskFetchRetry(secs) => format!("Rate limit hit, waiting {} seconds...", secs),
            Message::TaskFetchFailed { task_id, error } => {
                format!("Failed to fetch task {}: {}", task_id, error)
            }

            // === INVOICE MESSAGES ===
            Message::NoInvoicesFound => "No invoices found".to_string(),
            Message::OutstandingInvoicesHeader => "Outstanding invoices from last 7 days".to_string(),
            Message::OutstandingInvoicesFound(count) => {
                format!("Found {} outstanding invoices from last week", count)
            }
            Message::InvoicesTotal { total, count } => format!("Total: ${:.2}\nCount: {} invoices", total, count),
            Message::MustSpecifyInvoiceSelector => "Must specify --invoice-id or --last-week".to_string(),

            // === LIST MESSAGES ===
            Message::TotalHours(hours) => format!("Total: {:.2} hours", hours),

            // === TOOL SERVER MESSAGES ===
            Message::ServerStarted => "Paymo tool server listening on stdio".to_string(),
            Message::ServerApiKeyMissing => "API key not configured; run 'paymo-cli init' before starting the tool server".to_string(),
        };
        write!(f, "{}", message)
    }
}
