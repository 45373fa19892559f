//! Simulate command implementation

use crate::simulation::{simulate, SimulationInput};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Total balance to spread across the ladder
    #[arg(long)]
    pub balance: Decimal,

    /// Entry price of the first level
    #[arg(long)]
    pub entry: Decimal,

    /// Catastrophic floor price
    #[arg(long)]
    pub floor: Decimal,

    /// Drop per level in percent, e.g. 50
    #[arg(long)]
    pub drop: Decimal,

    /// Print the full result as JSON instead of the report
    #[arg(long)]
    pub json: bool,
}

impl SimulateArgs {
    pub fn input(&self) -> SimulationInput {
        SimulationInput {
            balance: self.balance,
            entry_price: self.entry,
            floor_price: self.floor,
            drop_percent: self.drop,
        }
    }

    pub fn execute(&self) -> anyhow::Result<()> {
        let result = simulate(&self.input())?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            for line in &result.report {
                println!("{}", line);
            }
        }
        Ok(())
    }
}
