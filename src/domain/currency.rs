//! Currency & presentation helpers

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{round2, round4};
use crate::{PricingError, Result};

/// Caller-supplied rate table keyed by the directed pair `"{from}_{to}"`,
/// e.g. `"USD_SGD"`. Treated as an immutable input per call.
pub type ExchangeRates = HashMap<String, Decimal>;

/// Conventional safety margin applied to exchange rates, in percent.
pub const DEFAULT_SAFETY_MARGIN_PERCENT: Decimal = dec!(5);

/// Biases a conversion rate upward by `safety_margin_percent` so converted
/// costs land in the seller's favor. Rounded to four decimals.
pub fn safe_exchange_rate(base_rate: Decimal, safety_margin_percent: Decimal) -> Decimal {
    round4(base_rate * (Decimal::ONE + safety_margin_percent / Decimal::ONE_HUNDRED))
}

/// Drops a price to the nearest `x.99` at or above its integer part:
/// `floor(price) + 0.99`.
pub fn round_to_psychological_price(price: Decimal) -> Decimal {
    price.floor() + dec!(0.99)
}

/// Converts `amount` between currencies using the supplied table. Returns
/// the amount unchanged when the currencies match; otherwise multiplies by
/// the directed rate, rounded to two decimals. A missing pair is an error;
/// no inversion or cross-rate through a third currency is attempted.
pub fn convert_currency(
    amount: Decimal,
    from_currency: &str,
    to_currency: &str,
    exchange_rates: &ExchangeRates,
) -> Result<Decimal> {
    if from_currency == to_currency {
        return Ok(amount);
    }
    let key = format!("{from_currency}_{to_currency}");
    let rate = exchange_rates
        .get(&key)
        .ok_or_else(|| PricingError::MissingRate {
            from: from_currency.to_string(),
            to: to_currency.to_string(),
        })?;
    Ok(round2(amount * rate))
}

/// Relative change from `old_price` to `new_price` in percent, rounded to
/// two decimals. Returns 0 when `old_price` is zero; that is a documented
/// special case, not an error.
pub fn price_change_percent(old_price: Decimal, new_price: Decimal) -> Decimal {
    if old_price == Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2((new_price - old_price) / old_price * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_exchange_rate() {
        assert_eq!(
            safe_exchange_rate(dec!(1.3250), DEFAULT_SAFETY_MARGIN_PERCENT),
            dec!(1.3913) // 1.3250 * 1.05 = 1.39125 -> 1.3913
        );
        assert_eq!(safe_exchange_rate(dec!(2), dec!(0)), dec!(2));
    }

    #[test]
    fn test_psychological_rounding() {
        assert_eq!(round_to_psychological_price(dec!(19.01)), dec!(19.99));
        assert_eq!(round_to_psychological_price(dec!(20.00)), dec!(20.99));
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let rates = ExchangeRates::new();
        assert_eq!(
            convert_currency(dec!(123.456), "SGD", "SGD", &rates).unwrap(),
            dec!(123.456)
        );
    }

    #[test]
    fn test_convert_uses_directed_pair_only() {
        let mut rates = ExchangeRates::new();
        rates.insert("USD_SGD".to_string(), dec!(1.35));
        assert_eq!(
            convert_currency(dec!(10), "USD", "SGD", &rates).unwrap(),
            dec!(13.50)
        );
        // The reverse pair is not derived by inversion.
        assert_eq!(
            convert_currency(dec!(10), "SGD", "USD", &rates),
            Err(PricingError::MissingRate {
                from: "SGD".to_string(),
                to: "USD".to_string(),
            })
        );
    }

    #[test]
    fn test_price_change_percent() {
        assert_eq!(price_change_percent(dec!(100), dec!(110)), dec!(10.00));
        assert_eq!(price_change_percent(dec!(150), dec!(100)), dec!(-33.33));
        assert_eq!(price_change_percent(dec!(0), dec!(50)), dec!(0));
    }
}
