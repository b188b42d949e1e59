pub mod delete;
pub mod entries;
pub mod export;
pub mod init;
pub mod invoices;
pub mod preview;
pub mod projects;
pub mod serve;
pub mod submit;
pub mod tasks;

use crate::api::Paymo;
use crate::libs::config::Config;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "List all active Paymo projects")]
    ListProjects,
    #[command(about = "List tasks for a project")]
    ListTasks(tasks::ListTasksArgs),
    #[command(about = "List time entries for a date range")]
    ListEntries(entries::ListEntriesArgs),
    #[command(about = "Preview timesheet entries without creating them")]
    Preview(preview::PreviewArgs),
    #[command(about = "Submit timesheet entries to Paymo")]
    Submit(submit::SubmitArgs),
    #[command(about = "Delete time entries by ID", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "List Paymo invoices")]
    ListInvoices(invoices::ListInvoicesArgs),
    #[command(about = "List Paymo invoices with status filters")]
    ListInvoicesFiltered(invoices::ListInvoicesFilteredArgs),
    #[command(about = "Export timesheet to CSV")]
    ExportTimesheet(export::ExportTimesheetArgs),
    #[command(about = "Export timesheets for invoice(s)")]
    ExportInvoiceTimesheets(export::ExportInvoiceTimesheetsArgs),
    #[command(about = "Run the stdio tool server for agent hosts")]
    Serve,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::ListProjects => projects::cmd().await,
            Commands::ListTasks(args) => tasks::cmd(args).await,
            Commands::ListEntries(args) => entries::cmd(args).await,
            Commands::Preview(args) => preview::cmd(args).await,
            Commands::Submit(args) => submit::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::ListInvoices(args) => invoices::cmd(args).await,
            Commands::ListInvoicesFiltered(args) => invoices::cmd_filtered(args).await,
            Commands::ExportTimesheet(args) => export::cmd_timesheet(args).await,
            Commands::ExportInvoiceTimesheets(args) => export::cmd_invoices(args).await,
            Commands::Serve => serve::cmd().await,
        }
    }
}

/// Builds an authenticated client from the configuration, prompting for
/// the API key when it is not on file.
pub(crate) fn client_from(config: &Config) -> Result<Paymo> {
    Ok(Paymo::new(&config.require_api_key()?))
}

pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
}
