//! Command implementations

mod config;
mod datasets;
mod nearby;
mod quiz;
mod search;

use crate::cli::{Cli, Commands, QuizCommand};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match &cli.command {
        Commands::Nearby(args) => nearby::execute(&cli, args, &output).await,
        Commands::Search(args) => search::execute(&cli, args, &output),
        Commands::Datasets => datasets::execute(&cli, &output),
        Commands::Quiz(args) => match &args.command {
            QuizCommand::List => quiz::list(&cli, &output),
            QuizCommand::Take(take) => quiz::take(&cli, take, &output),
        },
        Commands::Config => config::execute(&cli, &output),
    }
}
