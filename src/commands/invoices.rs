use super::client_from;
use crate::libs::messages::Message;
use crate::libs::{config::Config, view::View};
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListInvoicesArgs {
    #[arg(long, help = "Filter by client ID")]
    client_id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct ListInvoicesFilteredArgs {
    #[arg(long, help = "Filter by status (sent, viewed, paid)")]
    status: Option<String>,
    #[arg(long, help = "Only show outstanding invoices from last 7 days")]
    last_week: bool,
}

pub async fn cmd(args: ListInvoicesArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;

    let invoices = client.get_invoices(args.client_id, None).await?;
    View::invoices(&invoices).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}

pub async fn cmd_filtered(args: ListInvoicesFilteredArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;

    let invoices = if args.last_week {
        msg_print!(Message::OutstandingInvoicesHeader, true);
        client.outstanding_invoices_last_week().await?
    } else {
        client.get_invoices(None, args.status.as_deref()).await?
    };

    View::invoices(&invoices).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let total: f64 = invoices.iter().filter_map(|invoice| invoice.total).sum();
    msg_print!(
        Message::InvoicesTotal {
            total,
            count: invoices.len()
        },
        true
    );

    Ok(())
}
