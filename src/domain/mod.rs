//! Domain module
pub mod currency;
pub mod margin;
pub mod proposal;
pub mod risk;
pub mod validate;

use rust_decimal::{Decimal, RoundingStrategy};

/// Standard rounding for prices and percents: two decimal places, midpoint
/// away from zero (not truncation). Every price/percent this crate reports
/// goes through this one function so the checker and the safe-price
/// derivation can never drift apart.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Exchange rates carry more precision: four decimal places.
pub(crate) fn round4(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
