//! CLI interface for dca-ladder
//!
//! Provides subcommands for:
//! - `simulate`: Compute a DCA ladder and print the report
//! - `execute`: Simulate, then dry-run the batch against the paper exchange

mod execute;
mod simulate;

pub use execute::ExecuteArgs;
pub use simulate::SimulateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dca-ladder")]
#[command(about = "DCA ladder planner and batch LIMIT-order executor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a DCA ladder and print the report
    Simulate(SimulateArgs),
    /// Simulate, then dry-run the batch against the paper exchange
    Execute(ExecuteArgs),
}
