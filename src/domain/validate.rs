//! Settings and price validation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PricingError, Result};

/// Per-item pricing settings as stored by the settings service. The core
/// evaluator trusts these numbers as given; the hosting service runs
/// [`validate_settings`] when they are written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPricingSettings {
    pub min_margin_percent: Decimal,
    #[serde(default)]
    pub target_competitor_ratio: Option<Decimal>,
    #[serde(default)]
    pub min_allowed_price: Option<Decimal>,
    #[serde(default)]
    pub max_allowed_price: Option<Decimal>,
}

/// Rejects non-positive prices.
pub fn validate_price(price: Decimal) -> Result<()> {
    if price <= Decimal::ZERO {
        return Err(PricingError::NonPositivePrice(price));
    }
    Ok(())
}

/// Structural checks on stored settings: the margin floor must sit within
/// `[0, 100]` and the allowed price bounds must not be inverted.
pub fn validate_settings(settings: &ItemPricingSettings) -> Result<()> {
    if settings.min_margin_percent < Decimal::ZERO
        || settings.min_margin_percent > Decimal::ONE_HUNDRED
    {
        return Err(PricingError::MarginOutOfRange(settings.min_margin_percent));
    }
    if let (Some(min), Some(max)) = (settings.min_allowed_price, settings.max_allowed_price) {
        if min > max {
            return Err(PricingError::InvertedPriceBounds { min, max });
        }
    }
    Ok(())
}
