//! CSV export commands.
//!
//! `export-timesheet` writes all entries in a date range to a single CSV.
//! `export-invoice-timesheets` writes one CSV per invoice containing
//! exactly the entries billed on it, either for a specific invoice or for
//! every outstanding invoice from the last week.

use super::{client_from, parse_date};
use crate::api::Invoice;
use crate::libs::backoff::TokioSleeper;
use crate::libs::config::Config;
use crate::libs::export::{invoice_csv_filename, EntryExporter, INVOICE_LOOKBACK_DAYS};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportTimesheetArgs {
    #[arg(long, help = "Start date (YYYY-MM-DD)")]
    start: String,
    #[arg(long, help = "End date (YYYY-MM-DD)")]
    end: String,
    #[arg(long, help = "Filter by project ID")]
    project_id: Option<i64>,
    #[arg(short, long, help = "Output file path")]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExportInvoiceTimesheetsArgs {
    #[arg(long, help = "Specific invoice ID")]
    invoice_id: Option<i64>,
    #[arg(long, help = "Export for all outstanding invoices from last week")]
    last_week: bool,
    #[arg(short, long, default_value = ".", help = "Output directory for exports")]
    output_dir: PathBuf,
}

pub async fn cmd_timesheet(args: ExportTimesheetArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;
    let sleeper = TokioSleeper;

    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;

    msg_print!(
        Message::ExportingTimesheet {
            start: args.start.clone(),
            end: args.end.clone(),
        },
        true
    );
    if let Some(project_id) = args.project_id {
        msg_info!(Message::ExportProjectFilter(project_id));
    }

    let exporter = EntryExporter::new(&client, &sleeper);
    let csv_content = exporter.export_range(start, end, args.project_id).await?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("paymo_timesheet_{}_{}.csv", args.start, args.end)));
    fs::write(&output, &csv_content)?;

    msg_success!(Message::ExportCompleted {
        path: output.display().to_string(),
        bytes: csv_content.len(),
    });

    Ok(())
}

pub async fn cmd_invoices(args: ExportInvoiceTimesheetsArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;
    let sleeper = TokioSleeper;

    let invoices: Vec<Invoice> = if let Some(invoice_id) = args.invoice_id {
        vec![client.get_invoice(invoice_id, false).await?]
    } else if args.last_week {
        let outstanding = client.outstanding_invoices_last_week().await?;
        msg_print!(Message::OutstandingInvoicesFound(outstanding.len()), true);
        outstanding
    } else {
        msg_bail_anyhow!(Message::MustSpecifyInvoiceSelector);
    };

    if invoices.is_empty() {
        msg_warning!(Message::NoInvoicesFound);
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir)?;
    let exporter = EntryExporter::new(&client, &sleeper);

    let mut exported = 0;
    for invoice in &invoices {
        let number = invoice.number.clone().unwrap_or_else(|| format!("INV-{}", invoice.id));
        msg_print!(Message::ExportingInvoice(number.clone()), true);

        let end = invoice
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive());
        let start = end - Duration::days(INVOICE_LOOKBACK_DAYS);
        msg_print!(Message::InvoicePeriod {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        });
        msg_print!(Message::InvoiceAmount(invoice.total.unwrap_or(0.0)));

        match exporter.export_invoice(invoice.id).await {
            Ok(csv_content) => {
                let filename = invoice_csv_filename(invoice.number.as_deref(), invoice.id);
                let output_path = args.output_dir.join(filename);
                fs::write(&output_path, csv_content)?;
                msg_success!(Message::InvoiceExportSaved(output_path.display().to_string()));
                exported += 1;
            }
            Err(error) => {
                msg_error!(Message::InvoiceExportFailed(error.to_string()));
            }
        }
    }

    msg_success!(Message::InvoiceExportsCompleted(exported), true);
    Ok(())
}
