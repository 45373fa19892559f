//! Price-ladder simulation module
//!
//! Turns (balance, entry price, floor price, drop percent) into a
//! deterministic ladder of LIMIT BUY levels

mod engine;
mod types;

pub use engine::simulate;
pub use types::{PriceLevel, SimulationError, SimulationInput, SimulationResult};
