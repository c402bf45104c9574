//! Price Proposal assembly

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::currency::price_change_percent;
use super::margin::calculate_margin;
use super::risk::{check_red_risk, RiskConfig};
use crate::Result;

/// Margin headroom (in percentage points above the floor) under which a
/// non-red proposal is still reported as medium risk.
const MEDIUM_RISK_MARGIN_BAND: Decimal = dec!(5);

/// One price change awaiting evaluation, as supplied by the approval-queue
/// workflow. `metadata` is carried through untouched for the caller's own
/// bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub item_id: String,
    pub current_price: Decimal,
    pub proposed_price: Decimal,
    pub total_cost: Decimal,
    #[serde(default)]
    pub competitor: Option<CompetitorSnapshot>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Pre-aggregated competitor prices from the external feed. This module
/// never fetches them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorSnapshot {
    pub lowest_price: Option<Decimal>,
    pub average_price: Option<Decimal>,
}

/// Position of the proposed price against the competitor snapshot. The
/// `vs_*` fields are the percent distance of the proposal from each
/// competitor figure (positive means priced above it).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorComparison {
    pub lowest_price: Option<Decimal>,
    pub average_price: Option<Decimal>,
    pub vs_lowest_percent: Option<Decimal>,
    pub vs_average_percent: Option<Decimal>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    PendingApproval,
    Approved,
    Rejected,
    Applied,
    Failed,
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Structured verdict handed back to the approval queue, which persists it
/// as a pending-approval record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceProposal {
    pub id: Uuid,
    pub item_id: String,
    pub current_price: Decimal,
    pub proposed_price: Decimal,
    pub change_percent: Decimal,
    pub expected_margin_percent: Decimal,
    pub expected_profit: Decimal,
    pub is_red_risk: bool,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    pub min_safe_price: Decimal,
    pub can_adjust: bool,
    pub competitor_comparison: Option<CompetitorComparison>,
    pub status: ProposalStatus,
    pub metadata: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Evaluates one proposed price change end to end: margin, red-risk
/// screening, safe floor, change percent and competitor position. Pure
/// apart from the fresh id and timestamp on the returned record; the
/// verdict itself depends only on the inputs.
pub fn evaluate_proposal(request: &ProposalRequest, config: &RiskConfig) -> Result<PriceProposal> {
    let margin = calculate_margin(request.proposed_price, request.total_cost);
    let check = check_red_risk(request.proposed_price, request.total_cost, config)?;
    let change_percent = price_change_percent(request.current_price, request.proposed_price);
    let risk_level = derive_risk_level(check.is_red_risk, margin.margin_percent, config);
    let competitor_comparison = request
        .competitor
        .as_ref()
        .map(|snapshot| compare_competitors(request.proposed_price, snapshot));

    tracing::debug!(
        item_id = %request.item_id,
        proposed_price = %request.proposed_price,
        margin_percent = %margin.margin_percent,
        is_red_risk = check.is_red_risk,
        ?risk_level,
        "evaluated price proposal"
    );

    Ok(PriceProposal {
        id: Uuid::new_v4(),
        item_id: request.item_id.clone(),
        current_price: request.current_price,
        proposed_price: request.proposed_price,
        change_percent,
        expected_margin_percent: margin.margin_percent,
        expected_profit: margin.profit_amount,
        is_red_risk: check.is_red_risk,
        risk_level,
        reasons: check.reasons,
        min_safe_price: check.min_safe_price,
        can_adjust: check.can_adjust,
        competitor_comparison,
        status: ProposalStatus::default(),
        metadata: request.metadata.clone(),
        created_at: Utc::now(),
    })
}

fn derive_risk_level(is_red_risk: bool, margin_percent: Decimal, config: &RiskConfig) -> RiskLevel {
    if is_red_risk {
        RiskLevel::High
    } else if margin_percent < config.min_margin_percent + MEDIUM_RISK_MARGIN_BAND {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn compare_competitors(
    proposed_price: Decimal,
    snapshot: &CompetitorSnapshot,
) -> CompetitorComparison {
    CompetitorComparison {
        lowest_price: snapshot.lowest_price,
        average_price: snapshot.average_price,
        vs_lowest_percent: snapshot
            .lowest_price
            .map(|p| price_change_percent(p, proposed_price)),
        vs_average_percent: snapshot
            .average_price
            .map(|p| price_change_percent(p, proposed_price)),
    }
}
