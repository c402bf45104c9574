//! Repricer Core - Pricing Risk Evaluation
//!
//! Library consumed by the repricing approval workflow. Given a proposed
//! price, the landed cost and the per-item risk configuration, it computes
//! margin and profit, decides whether the change is an unacceptable
//! financial risk ("red risk"), and derives the minimum safe price.
//!
//! ## Features
//! - Margin and gross-profit calculation
//! - Red-risk screening with ordered, human-readable reasons
//! - Minimum safe price from margin and profit floors
//! - Conservative currency conversion helpers
//! - Price proposal assembly for the approval queue
//!
//! Every function is pure and synchronous: no I/O, no shared state, safe to
//! call concurrently. Values are `rust_decimal::Decimal` throughout.

use rust_decimal::Decimal;
use thiserror::Error;

pub mod domain;

pub use domain::currency::{
    convert_currency, price_change_percent, round_to_psychological_price, safe_exchange_rate,
    ExchangeRates, DEFAULT_SAFETY_MARGIN_PERCENT,
};
pub use domain::margin::{calculate_margin, MarginCalculation};
pub use domain::proposal::{
    evaluate_proposal, CompetitorComparison, CompetitorSnapshot, PriceProposal, ProposalRequest,
    ProposalStatus, RiskLevel,
};
pub use domain::risk::{check_red_risk, min_required_price, RedRiskCheck, RiskConfig};
pub use domain::validate::{validate_price, validate_settings, ItemPricingSettings};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A margin floor of 100% or more has no finite satisfying price.
    #[error("minimum margin of {0}% is unachievable (must be below 100%)")]
    UnachievableMargin(Decimal),

    /// The supplied rate table has no entry for the directed currency pair.
    /// No inversion or cross-rate through a third currency is attempted.
    #[error("no exchange rate for {from}_{to}")]
    MissingRate { from: String, to: String },

    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("minimum margin percent must be within 0..=100, got {0}")]
    MarginOutOfRange(Decimal),

    #[error("minimum allowed price {min} exceeds maximum allowed price {max}")]
    InvertedPriceBounds { min: Decimal, max: Decimal },
}

pub type Result<T> = std::result::Result<T, PricingError>;
