//! Configuration types for dca-ladder

use crate::exchange::{MarginMode, MarketEnvironment};
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Exchange and order defaults
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Trading pair orders are placed on
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Venue: spot, futures-live, or futures-testnet
    #[serde(default = "default_environment")]
    pub environment: MarketEnvironment,
    /// Futures margin mode
    #[serde(default = "default_margin_mode")]
    pub margin_mode: MarginMode,
    /// Futures leverage
    #[serde(default = "default_leverage")]
    pub leverage: u32,
}

fn default_symbol() -> String {
    "BTC/USDT".to_string()
}
fn default_environment() -> MarketEnvironment {
    MarketEnvironment::Spot
}
fn default_margin_mode() -> MarginMode {
    MarginMode::Isolated
}
fn default_leverage() -> u32 {
    1
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            environment: default_environment(),
            margin_mode: default_margin_mode(),
            leverage: default_leverage(),
        }
    }
}

/// Batch execution configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Delay between consecutive level submissions (milliseconds).
    /// Backpressure against exchange rate limits.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

fn default_pacing_ms() -> u64 {
    200
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter, e.g. "info" or "dca_ladder=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
