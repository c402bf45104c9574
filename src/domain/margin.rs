//! Margin Calculator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::round2;

/// Margin and profit figures for one selling price against one landed cost.
/// Recomputed per call, never cached.
///
/// `profit_amount` always equals `gross_profit`; the two fields report the
/// same number in different roles (absolute amount vs. the basis of
/// `margin_percent`) and downstream floors must read the matching one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginCalculation {
    pub total_cost: Decimal,
    pub selling_price: Decimal,
    pub gross_profit: Decimal,
    pub margin_percent: Decimal,
    pub profit_amount: Decimal,
    pub meets_min_margin: bool,
    pub meets_min_profit: bool,
}

/// Computes gross profit and margin percent. Total over all inputs,
/// including zero or negative price and cost.
///
/// `margin_percent` is `gross_profit / selling_price * 100` rounded to two
/// decimals, and 0 when `selling_price` is not positive. The `meets_*`
/// flags start out vacuously true (no floors configured yet); use
/// [`MarginCalculation::with_floors`] to evaluate them against real floors.
pub fn calculate_margin(selling_price: Decimal, total_cost: Decimal) -> MarginCalculation {
    let gross_profit = selling_price - total_cost;
    let margin_percent = if selling_price > Decimal::ZERO {
        round2(gross_profit / selling_price * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };
    MarginCalculation {
        total_cost,
        selling_price,
        gross_profit,
        margin_percent,
        profit_amount: gross_profit,
        meets_min_margin: true,
        meets_min_profit: true,
    }
}

impl MarginCalculation {
    /// Evaluates the `meets_*` flags against the configured floors. An
    /// absent profit floor leaves `meets_min_profit` true.
    pub fn with_floors(
        mut self,
        min_margin_percent: Decimal,
        min_profit_amount: Option<Decimal>,
    ) -> Self {
        self.meets_min_margin = self.margin_percent >= min_margin_percent;
        self.meets_min_profit = match min_profit_amount {
            Some(min) => self.profit_amount >= min,
            None => true,
        };
        self
    }
}
