use super::{client_from, parse_date};
use crate::libs::messages::Message;
use crate::libs::{config::Config, view::View};
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListEntriesArgs {
    #[arg(long, help = "Start date (YYYY-MM-DD)")]
    start: Option<String>,
    #[arg(long, help = "End date (YYYY-MM-DD)")]
    end: Option<String>,
}

pub async fn cmd(args: ListEntriesArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;

    let start = args.start.as_deref().map(parse_date).transpose()?;
    let end = args.end.as_deref().map(parse_date).transpose()?;

    let entries = client.get_entries(start, end).await?;
    View::entries(&entries).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let total_seconds: i64 = entries.iter().map(|entry| entry.duration_seconds()).sum();
    msg_print!(Message::TotalHours(total_seconds as f64 / 3600.0), true);

    Ok(())
}
