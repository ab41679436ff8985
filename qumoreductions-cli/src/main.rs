mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input } => commands::inspect::run(&input, cli.json),
        Commands::Reduce { input, penalty } => commands::reduce::run(&input, penalty, cli.json),
        #[cfg(feature = "solver")]
        Commands::Solve {
            input,
            no_admissibility,
        } => commands::solve::run(&input, !no_admissibility, cli.json),
    }
}
