use clap::{Parser, Subcommand};

use self::{generate_snapshot::GenerateSnapshotArg, select::SelectArg};

mod generate_snapshot;
mod select;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Score team diversity and select the point population of one generation
    Select(#[clap(flatten)] SelectArg),
    /// Generate a random evaluated generation snapshot
    GenerateSnapshot(#[clap(flatten)] GenerateSnapshotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Select(arg) => select::run(&arg)?,
        Mode::GenerateSnapshot(arg) => generate_snapshot::run(&arg)?,
    }
    Ok(())
}
