//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qumo",
    version,
    about = "Reduce optimization models to QUMO and settle DvP scenarios"
)]
pub struct Cli {
    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a scenario file and print its dimensions
    Inspect {
        /// Scenario file (settlement text format or JSON)
        input: PathBuf,
    },
    /// Build the settlement IP and reduce it to a QUMO instance
    Reduce {
        /// Scenario file in the settlement text format
        input: PathBuf,
        /// Penalty weight for the constraint substitution
        #[arg(long, default_value_t = 10.0)]
        penalty: f64,
    },
    /// Solve a scenario with the MILP backend and validate the result
    #[cfg(feature = "solver")]
    Solve {
        /// Scenario file in the settlement text format
        input: PathBuf,
        /// Skip the maximality (admissibility) check
        #[arg(long)]
        no_admissibility: bool,
    },
}
