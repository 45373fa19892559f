//! Paper exchange client
//!
//! In-memory stand-in for the live adapter: every order is acknowledged
//! immediately and kept until cancelled. Used by the CLI dry-run path and
//! as the default test double.

use super::{ExchangeClient, MarginMode, OrderConfirmation, OrderError, OrderIntent};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Paper trading exchange client with instant acknowledgements
#[derive(Default)]
pub struct PaperExchange {
    open_orders: Arc<RwLock<Vec<OrderConfirmation>>>,
}

impl PaperExchange {
    /// Create a new paper exchange with no resting orders
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders currently resting on the paper book
    pub async fn open_orders(&self) -> Vec<OrderConfirmation> {
        let orders = self.open_orders.read().await;
        orders.clone()
    }
}

#[async_trait]
impl ExchangeClient for PaperExchange {
    async fn place_order(&self, intent: &OrderIntent) -> Result<OrderConfirmation, OrderError> {
        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4().to_string(),
            symbol: intent.symbol.clone(),
            price: intent.price,
            quantity: intent.quantity,
            status: "open".to_string(),
            timestamp: Utc::now(),
        };

        let mut orders = self.open_orders.write().await;
        orders.push(confirmation.clone());

        tracing::info!(order_id = %confirmation.order_id, symbol = %intent.symbol, "Paper order placed");
        Ok(confirmation)
    }

    async fn cancel_order(&self, order_id: &str, symbol: &str) -> Result<(), OrderError> {
        let mut orders = self.open_orders.write().await;
        orders.retain(|o| o.order_id != order_id);

        tracing::info!(%order_id, %symbol, "Paper order cancelled");
        Ok(())
    }

    async fn set_margin_mode(&self, mode: MarginMode, symbol: &str) -> Result<(), OrderError> {
        tracing::info!(%mode, %symbol, "Paper margin mode set");
        Ok(())
    }

    async fn set_leverage(&self, leverage: u32, symbol: &str) -> Result<(), OrderError> {
        tracing::info!(leverage, %symbol, "Paper leverage set");
        Ok(())
    }
}
