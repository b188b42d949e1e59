use super::client_from;
use crate::libs::{config::Config, view::View};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;

    let projects = client.get_projects(true).await?;
    View::projects(&projects).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    Ok(())
}
