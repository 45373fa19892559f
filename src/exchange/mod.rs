//! Exchange client boundary
//!
//! The batch engine talks to the exchange only through [`ExchangeClient`];
//! the live Binance adapter lives outside this crate

mod paper;
mod types;

pub use paper::PaperExchange;
pub use types::{
    MarginMode, MarketEnvironment, OrderConfirmation, OrderError, OrderIntent, OrderSide,
    OrderType,
};

use async_trait::async_trait;

/// Capability the batch engine places, cancels, and configures orders through
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Submit an order, returning the exchange's confirmation
    async fn place_order(&self, intent: &OrderIntent) -> Result<OrderConfirmation, OrderError>;
    /// Cancel a previously placed order
    async fn cancel_order(&self, order_id: &str, symbol: &str) -> Result<(), OrderError>;
    /// Set the margin mode for a symbol (futures only)
    async fn set_margin_mode(&self, mode: MarginMode, symbol: &str) -> Result<(), OrderError>;
    /// Set the leverage for a symbol (futures only)
    async fn set_leverage(&self, leverage: u32, symbol: &str) -> Result<(), OrderError>;
}
