//! Red-Risk Checker

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::margin::calculate_margin;
use super::round2;
use crate::{PricingError, Result};

/// Per-item risk configuration, supplied by the settings store at call time.
/// No ambient or global configuration is consulted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub min_margin_percent: Decimal,
    pub min_profit_amount: Option<Decimal>,
    pub allow_loss: bool,
    pub max_loss_percent: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            min_margin_percent: Decimal::ZERO,
            min_profit_amount: None,
            allow_loss: false,
            max_loss_percent: Decimal::ZERO,
        }
    }
}

/// Verdict for one proposed price. Built fresh per call; `reasons` accumulate
/// in check order and are never removed, even when the loss allowance flips
/// the flag back off.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedRiskCheck {
    pub is_red_risk: bool,
    pub reasons: Vec<String>,
    pub can_adjust: bool,
    pub min_safe_price: Decimal,
}

/// Screens a proposed price against the margin floor, the absolute profit
/// floor and the cost floor, in that order, then applies the loss-allowance
/// override.
///
/// The profit floor only runs when `min_profit_amount` is configured. The
/// override flips `is_red_risk` back to false when `allow_loss` is set and
/// the margin magnitude sits within `max_loss_percent`; with
/// `max_loss_percent` at zero it rescues only an exact break-even.
///
/// `can_adjust` keeps two independent gates: a non-red proposal is always
/// adjustable, and a red one is still adjustable if it sits at or above the
/// separately computed safe floor. Both gates are deliberate; they must not
/// be collapsed into one.
pub fn check_red_risk(
    proposed_price: Decimal,
    total_cost: Decimal,
    config: &RiskConfig,
) -> Result<RedRiskCheck> {
    let margin = calculate_margin(proposed_price, total_cost)
        .with_floors(config.min_margin_percent, config.min_profit_amount);

    let mut is_red_risk = false;
    let mut reasons = Vec::new();

    if !margin.meets_min_margin {
        is_red_risk = true;
        reasons.push(format!(
            "margin {}% is below the required {}%",
            margin.margin_percent, config.min_margin_percent
        ));
    }

    if let Some(min_profit) = config.min_profit_amount {
        if margin.profit_amount < min_profit {
            is_red_risk = true;
            reasons.push(format!(
                "profit {} falls {} short of the {} minimum",
                margin.profit_amount,
                min_profit - margin.profit_amount,
                min_profit
            ));
        }
    }

    if margin.profit_amount < Decimal::ZERO {
        is_red_risk = true;
        reasons.push(format!(
            "price {} is below cost {}",
            proposed_price, total_cost
        ));
    }

    if is_red_risk && config.allow_loss {
        let loss_percent = margin.margin_percent.abs();
        if loss_percent <= config.max_loss_percent {
            is_red_risk = false;
            reasons.push(format!(
                "loss of {}% is within the allowed {}%",
                loss_percent, config.max_loss_percent
            ));
        }
    }

    let min_safe_price =
        min_required_price(total_cost, config.min_margin_percent, config.min_profit_amount)?;
    let can_adjust = !is_red_risk || proposed_price >= min_safe_price;

    if is_red_risk {
        tracing::warn!(
            %proposed_price,
            %total_cost,
            margin_percent = %margin.margin_percent,
            %min_safe_price,
            "proposed price flagged as red risk"
        );
    }

    Ok(RedRiskCheck {
        is_red_risk,
        reasons,
        can_adjust,
        min_safe_price,
    })
}

/// Smallest price satisfying the margin-percent floor and the absolute
/// profit floor simultaneously, rounded with the same two-decimal rule the
/// margin calculator uses.
///
/// A margin floor of 100% or more has no finite solution and is rejected as
/// a configuration error before any arithmetic.
pub fn min_required_price(
    total_cost: Decimal,
    min_margin_percent: Decimal,
    min_profit_amount: Option<Decimal>,
) -> Result<Decimal> {
    if min_margin_percent >= Decimal::ONE_HUNDRED {
        return Err(PricingError::UnachievableMargin(min_margin_percent));
    }

    let price_from_margin =
        total_cost / (Decimal::ONE - min_margin_percent / Decimal::ONE_HUNDRED);
    let floor = match min_profit_amount {
        Some(min_profit) => price_from_margin.max(total_cost + min_profit),
        None => price_from_margin,
    };
    Ok(round2(floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config(min_margin: Decimal) -> RiskConfig {
        RiskConfig {
            min_margin_percent: min_margin,
            ..RiskConfig::default()
        }
    }

    #[test]
    fn test_red_risk_boundary() {
        // cost 100, floor 20%: 124.99 is 19.99% (red), 125.01 is 20.01% (not).
        let check = check_red_risk(dec!(124.99), dec!(100), &config(dec!(20))).unwrap();
        assert!(check.is_red_risk);
        assert_eq!(check.reasons.len(), 1);
        assert_eq!(check.min_safe_price, dec!(125.00));

        let check = check_red_risk(dec!(125.01), dec!(100), &config(dec!(20))).unwrap();
        assert!(!check.is_red_risk);
        assert!(check.reasons.is_empty());
        assert!(check.can_adjust);
    }

    #[test]
    fn test_cost_floor_always_flags() {
        // Below cost is red even with a zero margin floor.
        let check = check_red_risk(dec!(99.50), dec!(100), &config(dec!(0))).unwrap();
        assert!(check.is_red_risk);
        assert!(check.reasons.iter().any(|r| r.contains("below cost")));
    }

    #[test]
    fn test_loss_allowance_override() {
        let cfg = RiskConfig {
            min_margin_percent: dec!(10),
            min_profit_amount: None,
            allow_loss: true,
            max_loss_percent: dec!(10),
        };
        // cost 100, price 95: margin -5.26%, inside the 10% allowance.
        let check = check_red_risk(dec!(95), dec!(100), &cfg).unwrap();
        assert!(!check.is_red_risk);
        assert!(check.can_adjust);
        // Margin and cost-floor reasons stay, plus the trailing override note.
        assert_eq!(check.reasons.len(), 3);
        assert!(check.reasons[2].contains("within the allowed"));
    }

    #[test]
    fn test_zero_loss_allowance_rescues_nothing() {
        let cfg = RiskConfig {
            min_margin_percent: dec!(10),
            min_profit_amount: None,
            allow_loss: true,
            max_loss_percent: dec!(0),
        };
        let check = check_red_risk(dec!(95), dec!(100), &cfg).unwrap();
        assert!(check.is_red_risk);

        // Exact break-even is the one rescued case.
        let check = check_red_risk(dec!(100), dec!(100), &cfg).unwrap();
        assert!(!check.is_red_risk);
    }

    #[test]
    fn test_profit_floor_independent_of_margin_floor() {
        // 25% margin but only 5 profit: still red under a 10 profit floor.
        let cfg = RiskConfig {
            min_margin_percent: dec!(10),
            min_profit_amount: Some(dec!(10)),
            allow_loss: false,
            max_loss_percent: dec!(0),
        };
        let check = check_red_risk(dec!(20), dec!(15), &cfg).unwrap();
        assert!(check.is_red_risk);
        assert_eq!(check.reasons.len(), 1);
        assert!(check.reasons[0].contains("short of the 10 minimum"));
    }

    #[test]
    fn test_absent_profit_floor_never_contributes() {
        let check = check_red_risk(dec!(20), dec!(15), &config(dec!(10))).unwrap();
        assert!(!check.is_red_risk);
        assert!(check.reasons.is_empty());
    }

    #[test]
    fn test_red_price_at_safe_floor_stays_adjustable() {
        // Rounding can leave the rounded safe floor a hair short of the
        // exact margin floor; a red proposal sitting on it still passes the
        // second gate. cost 33.34 at 25%: floor 44.4533 -> 44.45, where the
        // margin rounds to 24.99%.
        let check = check_red_risk(dec!(44.45), dec!(33.34), &config(dec!(25))).unwrap();
        assert!(check.is_red_risk);
        assert_eq!(check.min_safe_price, dec!(44.45));
        assert!(check.can_adjust);

        // Below the floor both gates say no.
        let check = check_red_risk(dec!(124.99), dec!(100), &config(dec!(20))).unwrap();
        assert!(check.is_red_risk);
        assert!(!check.can_adjust);
        assert_eq!(check.min_safe_price, dec!(125.00));
    }

    #[test]
    fn test_min_required_price() {
        assert_eq!(
            min_required_price(dec!(50), dec!(15), Some(dec!(10))).unwrap(),
            dec!(60.00)
        );
        // Margin floor dominates when the profit floor is low.
        assert_eq!(
            min_required_price(dec!(50), dec!(15), Some(dec!(2))).unwrap(),
            dec!(58.82)
        );
        assert_eq!(
            min_required_price(dec!(100), dec!(20), None).unwrap(),
            dec!(125.00)
        );
    }

    #[test]
    fn test_min_required_price_monotonic() {
        let cost = dec!(50);
        let mut last = Decimal::MIN;
        for mm in [dec!(0), dec!(5), dec!(10), dec!(15), dec!(20), dec!(50)] {
            let p = min_required_price(cost, mm, None).unwrap();
            assert!(p >= last, "not monotonic in margin floor at {mm}");
            last = p;
        }
        let mut last = Decimal::MIN;
        for mp in [dec!(0), dec!(5), dec!(10), dec!(25)] {
            let p = min_required_price(cost, dec!(10), Some(mp)).unwrap();
            assert!(p >= last, "not monotonic in profit floor at {mp}");
            last = p;
        }
    }

    #[test]
    fn test_unachievable_margin_rejected() {
        assert_eq!(
            min_required_price(dec!(50), dec!(100), None),
            Err(PricingError::UnachievableMargin(dec!(100)))
        );
        assert!(min_required_price(dec!(50), dec!(150), None).is_err());
        // The checker surfaces the same configuration error.
        assert!(check_red_risk(dec!(60), dec!(50), &config(dec!(100))).is_err());
    }
}
