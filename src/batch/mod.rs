//! Batch execution module
//!
//! Submits a simulated ladder as resting LIMIT BUY orders, one level at a
//! time, rolling back already-placed orders when a later placement fails

mod engine;
mod types;

pub use engine::{BatchEngine, BatchHandle, BatchRun};
pub use types::{
    BatchError, BatchEvent, BatchOutcome, BatchRequest, LevelEvent, LevelFailure,
    LevelFailureKind, OrderRecord,
};
