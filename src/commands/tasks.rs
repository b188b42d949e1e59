use super::client_from;
use crate::libs::{config::Config, view::View};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListTasksArgs {
    #[arg(long, help = "Project ID")]
    project_id: i64,
}

pub async fn cmd(args: ListTasksArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;

    let tasks = client.get_tasks(Some(args.project_id)).await?;
    View::tasks(&tasks).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}
