//! Ladder construction algorithm

use super::{PriceLevel, SimulationError, SimulationInput, SimulationResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Safety cap on ladder length for vanishingly small drop percentages
const MAX_LEVELS: usize = 1000;

/// Prices collapsing below this are treated as having reached zero
const MIN_PRICE: Decimal = dec!(0.00000001);

/// Compute the DCA ladder for the given input.
///
/// The ladder starts at the entry price and drops by `drop_percent` per
/// level. The level that first crosses the floor price is always included
/// as the terminal rung, so the ladder ends at or below the floor.
///
/// Deterministic: identical inputs produce identical results.
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, SimulationError> {
    validate(input)?;

    let prices = build_price_ladder(input);
    let count = prices.len();
    if count == 0 {
        // Unreachable after validation, kept as a guard against a
        // degenerate ladder ever dividing the balance by zero.
        return Err(SimulationError::EmptyLadder);
    }

    let amount_per_level = input.balance / Decimal::from(count as u64);

    let mut report = Vec::with_capacity(count + 9);
    report.push(format!("Balance: {:.2}", input.balance));
    report.push(format!("Initial entry price: {:.8}", input.entry_price));
    report.push(format!("Floor price: {:.8}", input.floor_price));
    report.push(format!("Drop per level: {}%", input.drop_percent));
    report.push("-".repeat(50));
    report.push(format!("Total DCA levels: {}", count));
    report.push(format!(
        "Amount per DCA level: {:.2} / {} = {:.2}",
        input.balance, count, amount_per_level
    ));
    report.push("-".repeat(50));
    report.push("Allocation per DCA level:".to_string());

    let mut levels = Vec::with_capacity(count);
    for (i, price) in prices.into_iter().enumerate() {
        let index = i + 1;
        let quantity = if price <= Decimal::ZERO {
            // Undefined quantity; recorded as zero and flagged so the
            // batch engine skips the level instead of submitting it.
            report.push(format!(
                "Level {}: price {:.8} is invalid for a quantity",
                index, price
            ));
            Decimal::ZERO
        } else {
            let quantity = amount_per_level / price;
            report.push(format!(
                "Level {}: {:.2} / {:.8} = {:.8} (quantity)",
                index, amount_per_level, price, quantity
            ));
            quantity
        };
        levels.push(PriceLevel {
            index,
            price,
            quantity,
        });
    }

    Ok(SimulationResult {
        input: input.clone(),
        levels,
        amount_per_level,
        report,
    })
}

fn validate(input: &SimulationInput) -> Result<(), SimulationError> {
    if input.balance <= Decimal::ZERO {
        return Err(SimulationError::NonPositiveBalance);
    }
    if input.entry_price <= Decimal::ZERO {
        return Err(SimulationError::NonPositiveEntryPrice);
    }
    if input.floor_price < Decimal::ZERO {
        return Err(SimulationError::NegativeFloorPrice);
    }
    if input.entry_price < input.floor_price {
        return Err(SimulationError::EntryBelowFloor);
    }
    if input.drop_percent <= Decimal::ZERO || input.drop_percent >= dec!(100) {
        return Err(SimulationError::DropPercentOutOfRange);
    }
    Ok(())
}

/// Walk prices down from the entry until the floor is crossed.
fn build_price_ladder(input: &SimulationInput) -> Vec<Decimal> {
    let drop_factor = Decimal::ONE - input.drop_percent / dec!(100);
    let mut prices = Vec::new();
    let mut current = input.entry_price;

    loop {
        if prices.len() >= MAX_LEVELS {
            break;
        }

        prices.push(current);

        if current <= input.floor_price {
            break;
        }

        let next = current * drop_factor;
        if next <= input.floor_price {
            // The rung that actually crosses the floor is part of the
            // ladder: it is the terminal catastrophic entry.
            prices.push(next);
            break;
        }

        current = next;
        if current < MIN_PRICE {
            break;
        }
    }

    prices
}
