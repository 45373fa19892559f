//! Batch execution types

use crate::exchange::{MarginMode, MarketEnvironment, OrderConfirmation, OrderError, OrderIntent};
use crate::simulation::PriceLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced when starting a batch
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// Only one batch may run per engine instance at a time
    #[error("A batch is already running")]
    AlreadyRunning,
}

/// Everything one batch run needs; the ladder is handed over by value so the
/// run owns it outright and no stale copy survives elsewhere
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Trading pair, e.g. "BTC/USDT"
    pub symbol: String,
    /// Venue the orders are placed on
    pub environment: MarketEnvironment,
    /// Margin mode applied once before the first order (futures only)
    pub margin_mode: MarginMode,
    /// Leverage applied once before the first order (futures only)
    pub leverage: u32,
    /// Ladder levels to submit, in order
    pub levels: Vec<PriceLevel>,
}

/// A successfully placed order, kept only to drive rollback within the
/// same run
#[derive(Debug, Clone)]
pub struct OrderRecord {
    /// 1-based ladder index the order came from
    pub level_index: usize,
    /// The intent that was submitted
    pub intent: OrderIntent,
    /// Exchange-assigned order id
    pub order_id: String,
    /// Exchange-reported status at placement time
    pub status: String,
}

/// Classification of a failed level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelFailureKind {
    /// Non-positive price or quantity on the level itself; skipped, never
    /// submitted, does not abort the batch
    InvalidLevelData,
    InsufficientFunds,
    InvalidParameters,
    Network,
    Exchange,
    Unexpected,
}

/// A failed level attempt with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFailure {
    pub kind: LevelFailureKind,
    pub message: String,
}

impl LevelFailure {
    /// Local data problem on one ladder entry
    pub fn invalid_level_data(message: impl Into<String>) -> Self {
        Self {
            kind: LevelFailureKind::InvalidLevelData,
            message: message.into(),
        }
    }
}

impl From<&OrderError> for LevelFailure {
    fn from(err: &OrderError) -> Self {
        let kind = match err {
            OrderError::InsufficientFunds(_) => LevelFailureKind::InsufficientFunds,
            OrderError::InvalidParameters(_) => LevelFailureKind::InvalidParameters,
            OrderError::Network(_) => LevelFailureKind::Network,
            OrderError::Exchange(_) => LevelFailureKind::Exchange,
            OrderError::Unexpected(_) => LevelFailureKind::Unexpected,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// One event per level attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEvent {
    /// 1-based ladder index that was attempted
    pub level_index: usize,
    /// Trading pair the attempt was for
    pub symbol: String,
    /// Confirmation on success, classified failure otherwise
    pub outcome: Result<OrderConfirmation, LevelFailure>,
}

/// Terminal value of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOutcome {
    /// Every level was attempted without a fatal error
    Completed {
        /// Orders actually placed (skipped levels excluded)
        placed: usize,
    },
    /// A fatal error stopped the batch; earlier orders were cancelled
    /// best-effort
    RolledBack {
        /// Ladder index of the failing attempt; 0 means the margin/leverage
        /// pre-flight failed before any order was placed
        failed_level: usize,
        /// Classified cause
        reason: LevelFailure,
    },
    /// The caller cancelled between levels; earlier orders were cancelled
    /// best-effort
    Cancelled,
}

/// Events delivered to the caller over the run's channel: any number of
/// level events followed by exactly one terminal event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchEvent {
    /// Outcome of a single level attempt
    Level(LevelEvent),
    /// Terminal outcome with a display-ready summary
    Finished {
        outcome: BatchOutcome,
        summary: String,
    },
}
