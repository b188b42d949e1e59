use super::client_from;
use crate::libs::backoff::TokioSleeper;
use crate::libs::{config::Config, processor::TimesheetProcessor, timesheet::Timesheet};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(help = "Timesheet YAML file")]
    file: PathBuf,
    #[arg(long, help = "Preview only, do not create entries")]
    dry_run: bool,
    #[arg(short, long, help = "Skip confirmation prompt")]
    yes: bool,
}

pub async fn cmd(args: SubmitArgs) -> Result<()> {
    let config = Config::read()?;
    let client = client_from(&config)?;
    let sleeper = TokioSleeper;

    let timesheet = Timesheet::load(&args.file)?;
    let processor = TimesheetProcessor::new(&client, &config, &sleeper);
    processor.submit(&timesheet, args.dry_run, args.yes).await?;

    Ok(())
}
