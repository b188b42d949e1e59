use super::client_from;
use crate::libs::backoff::TokioSleeper;
use crate::libs::{config::Config, processor::TimesheetProcessor, timesheet::Timesheet};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[arg(help = "Timesheet YAML file")]
    file: PathBuf,
}

pub async fn cmd(args: PreviewArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;
    let sleeper = TokioSleeper;

    let timesheet = Timesheet::load(&args.file)?;
    let processor = TimesheetProcessor::new(&client, &config, &sleeper);
    processor.preview(&timesheet)?;

    Ok(())
}
