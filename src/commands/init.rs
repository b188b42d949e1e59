use crate::libs::config::{Config, CONFIG_FILE_NAME};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::init()?;
    config.save()?;

    let path = DataStorage::new()
        .get_path(CONFIG_FILE_NAME)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    msg_info!(Message::ConfigProjectMappings(config.projects.len()));

    Ok(())
}
