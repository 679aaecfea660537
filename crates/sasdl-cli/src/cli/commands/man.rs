use anyhow::Result;
use clap::CommandFactory;
use std::io;

use crate::cli::Cli;

/// Renders the top-level man page to stdout.
pub fn run_man() -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    man.render(&mut io::stdout())?;
    Ok(())
}
