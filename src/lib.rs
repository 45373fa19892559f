//! dca-ladder: DCA ladder planner and batch LIMIT-order executor
//!
//! This library provides the core components for:
//! - Deterministic price-ladder simulation between an entry price and a
//!   catastrophic floor price
//! - Batch submission of the ladder as resting LIMIT BUY orders with
//!   all-or-nothing rollback semantics
//! - An exchange client boundary (paper implementation included)
//! - CLI entry points for planning and dry-run execution
//! - Structured logging

pub mod batch;
pub mod cli;
pub mod config;
pub mod exchange;
pub mod simulation;
pub mod telemetry;
