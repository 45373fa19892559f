//! Simulation types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Simulation input validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Balance must be strictly positive
    #[error("Balance must be a positive number")]
    NonPositiveBalance,
    /// Entry price must be strictly positive
    #[error("Entry price must be a positive number")]
    NonPositiveEntryPrice,
    /// Floor price may be zero (ride to zero) but never negative
    #[error("Floor price cannot be negative")]
    NegativeFloorPrice,
    /// Entry price may equal the floor (one-level ladder) but never sit below it
    #[error("Entry price cannot be below the floor price")]
    EntryBelowFloor,
    /// Drop percent must be in the open interval (0, 100)
    #[error("Drop percent must be between 0 and 100 (exclusive)")]
    DropPercentOutOfRange,
    /// No levels could be produced from the given parameters
    #[error("No DCA levels possible with the given parameters")]
    EmptyLadder,
}

/// Parameters for one ladder simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Total quote-currency budget to spread across the ladder
    pub balance: Decimal,
    /// Price of the first (highest) level
    pub entry_price: Decimal,
    /// Catastrophic price; the ladder stops once it is crossed
    pub floor_price: Decimal,
    /// Percentage drop between consecutive levels, e.g. 50 for 50%
    pub drop_percent: Decimal,
}

/// One rung of the ladder. Produced only by [`simulate`](super::simulate)
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// 1-based position in the ladder
    pub index: usize,
    /// LIMIT price for this level
    pub price: Decimal,
    /// Base-currency quantity bought at this level
    pub quantity: Decimal,
}

/// Full output of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Inputs the ladder was computed from
    pub input: SimulationInput,
    /// Ladder levels, highest price first
    pub levels: Vec<PriceLevel>,
    /// Quote-currency amount allocated to each level
    pub amount_per_level: Decimal,
    /// Display-ready report, stable in content and order
    pub report: Vec<String>,
}
