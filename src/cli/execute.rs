//! Execute command implementation
//!
//! Dry-runs the batch against the in-memory paper exchange; the live
//! adapter is wired in by the embedding application.

use crate::batch::{BatchEngine, BatchEvent, BatchRequest};
use crate::config::Config;
use crate::exchange::PaperExchange;
use crate::simulation::{simulate, SimulationInput};
use clap::Args;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct ExecuteArgs {
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

    /// Trading pair; defaults to the configured symbol
    #[arg(long)]
    pub symbol: Option<String>,
}

impl ExecuteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let input = SimulationInput {
            balance: self.balance,
            entry_price: self.entry,
            floor_price: self.floor,
            drop_percent: self.drop,
        };
        let result = simulate(&input)?;

        for line in &result.report {
            println!("{}", line);
        }

        let symbol = self
            .symbol
            .clone()
            .unwrap_or_else(|| config.exchange.symbol.clone());
        tracing::info!(%symbol, levels = result.levels.len(), "Starting paper batch");

        let exchange = Arc::new(PaperExchange::new());
        let engine = BatchEngine::new(exchange)
            .with_pacing(Duration::from_millis(config.batch.pacing_ms));

        let request = BatchRequest {
            symbol,
            environment: config.exchange.environment,
            margin_mode: config.exchange.margin_mode,
            leverage: config.exchange.leverage,
            levels: result.levels,
        };

        let mut run = engine.start(request)?;
        while let Some(event) = run.events.recv().await {
            match event {
                BatchEvent::Level(level) => match level.outcome {
                    Ok(confirmation) => tracing::info!(
                        level = level.level_index,
                        order_id = %confirmation.order_id,
                        price = %confirmation.price,
                        "Level placed"
                    ),
                    Err(failure) => tracing::warn!(
                        level = level.level_index,
                        kind = ?failure.kind,
                        "Level failed: {}",
                        failure.message
                    ),
                },
                BatchEvent::Finished { summary, .. } => {
                    println!("{}", summary);
                }
            }
        }

        Ok(())
    }
}
