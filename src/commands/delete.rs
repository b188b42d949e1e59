use super::client_from;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_error, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(required = true, help = "Entry IDs to delete")]
    entry_ids: Vec<i64>,
    #[arg(short, long, help = "Skip confirmation prompt")]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;

    msg_print!(Message::AboutToDeleteEntries(args.entry_ids.len()), true);
    for entry_id in &args.entry_ids {
        msg_print!(Message::EntryToDelete(*entry_id));
    }

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteEntries.to_string())
            .interact()?;
        if !confirmed {
            msg_warning!(Message::Cancelled);
            return Ok(());
        }
    }

    let mut deleted = 0;
    for entry_id in &args.entry_ids {
        msg_print!(Message::DeletingEntry(*entry_id));
        match client.delete_entry(*entry_id).await {
            Ok(_) => deleted += 1,
            Err(error) => msg_error!(Message::DeleteFailed(error.to_string())),
        }
    }

    msg_success!(Message::EntriesDeleted(deleted), true);
    Ok(())
}
