//! kwgroup CLI — topic-based keyword grouping.
//!
//! Splits keyword lists into named groups of at most 50 keywords and
//! generates one Ahrefs organic-keywords URL per group.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
