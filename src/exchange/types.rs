//! Exchange boundary types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified exchange failure.
///
/// Every remote error is mapped to one of these kinds so callers can branch
/// on the classification instead of inspecting message text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Account balance cannot cover the order
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    /// The exchange rejected the order parameters
    #[error("Invalid order parameters: {0}")]
    InvalidParameters(String),
    /// Connectivity problem reaching the exchange
    #[error("Network error: {0}")]
    Network(String),
    /// Any other error returned by the exchange API
    #[error("Exchange error: {0}")]
    Exchange(String),
    /// Anything that does not fit the categories above
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Which venue the orders are placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketEnvironment {
    Spot,
    FuturesLive,
    FuturesTestnet,
}

impl MarketEnvironment {
    /// Futures venues take the margin/leverage pre-flight step
    pub fn is_futures(&self) -> bool {
        matches!(self, Self::FuturesLive | Self::FuturesTestnet)
    }
}

/// Futures margin mode, applied once per batch before the first order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    Cross,
    Isolated,
}

impl std::fmt::Display for MarginMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cross => write!(f, "cross"),
            Self::Isolated => write!(f, "isolated"),
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Resting order at a specified price
    Limit,
    /// Immediate execution at the current price
    Market,
}

/// An order to be submitted, derived 1:1 from a ladder level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    /// Trading pair, e.g. "BTC/USDT"
    pub symbol: String,
    /// Trade side
    pub side: OrderSide,
    /// Order type
    pub order_type: OrderType,
    /// Limit price
    pub price: Decimal,
    /// Base-currency quantity
    pub quantity: Decimal,
}

/// Exchange acknowledgement of a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Exchange-assigned order id
    pub order_id: String,
    /// Trading pair the order rests on
    pub symbol: String,
    /// Acknowledged limit price
    pub price: Decimal,
    /// Acknowledged quantity
    pub quantity: Decimal,
    /// Exchange-reported status, e.g. "open"
    pub status: String,
    /// Acknowledgement time
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_environment_futures_flag() {
        assert!(!MarketEnvironment::Spot.is_futures());
        assert!(MarketEnvironment::FuturesLive.is_futures());
        assert!(MarketEnvironment::FuturesTestnet.is_futures());
    }

    #[test]
    fn test_market_environment_serde_names() {
        let json = serde_json::to_string(&MarketEnvironment::FuturesTestnet).unwrap();
        assert_eq!(json, "\"futures-testnet\"");
        let back: MarketEnvironment = serde_json::from_str("\"spot\"").unwrap();
        assert_eq!(back, MarketEnvironment::Spot);
    }

    #[test]
    fn test_margin_mode_display() {
        assert_eq!(MarginMode::Cross.to_string(), "cross");
        assert_eq!(MarginMode::Isolated.to_string(), "isolated");
    }

    #[test]
    fn test_order_error_display_carries_detail() {
        let err = OrderError::InsufficientFunds("need 100 USDT".to_string());
        assert_eq!(err.to_string(), "Insufficient funds: need 100 USDT");
    }

    #[test]
    fn test_order_intent_creation() {
        let intent = OrderIntent {
            symbol: "BTC/USDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            price: dec!(40),
            quantity: dec!(5),
        };
        assert_eq!(intent.symbol, "BTC/USDT");
        assert_eq!(intent.side, OrderSide::Buy);
        assert_eq!(intent.order_type, OrderType::Limit);
        assert_eq!(intent.price, dec!(40));
    }
}
