//! Convoy CLI: convert every supported media file in a directory.

use anyhow::Result;
use clap::Parser;
use convoy::cli::Cli;
use convoy::run::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
