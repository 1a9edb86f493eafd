//! Intervention ROI simulation over the enriched portfolio.
//!
//! Prevented defaults per tier couple to the tier's empirical delinquency
//! rate, not a global constant, so the simulation reflects the tier engine's
//! actual partition of the portfolio.

use serde::Serialize;

use super::dataset::EnrichedDataset;
use super::domain::RiskTier;
use super::thresholds::InterventionEconomics;
use super::{round1, round2};

/// Cost and benefit projection for the tier-based intervention program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiAnalysis {
    pub program_cost: ProgramCost,
    pub prevented_defaults: f64,
    pub revenue_protected: f64,
    pub net_benefit: f64,
    pub roi_percentage: f64,
    pub per_dollar_yield: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgramCost {
    pub high_tier: f64,
    pub medium_tier: f64,
    pub low_tier: f64,
    pub total: f64,
}

fn tier_outcome(
    dataset: &EnrichedDataset,
    economics: &InterventionEconomics,
    tier: RiskTier,
) -> (f64, f64) {
    let count = dataset.tier_members(tier).count();
    let delinquent = dataset
        .tier_members(tier)
        .filter(|customer| customer.is_delinquent)
        .count();

    // An empty tier contributes nothing rather than a 0/0 rate.
    let delinquency_rate = if count == 0 {
        0.0
    } else {
        delinquent as f64 / count as f64
    };

    let prevented = count as f64 * economics.prevention_rate(tier) * delinquency_rate;
    let cost = count as f64 * economics.unit_cost(tier);
    (prevented, cost)
}

pub fn calculate_roi(dataset: &EnrichedDataset, economics: &InterventionEconomics) -> RoiAnalysis {
    let (high_prevented, high_cost) = tier_outcome(dataset, economics, RiskTier::High);
    let (medium_prevented, medium_cost) = tier_outcome(dataset, economics, RiskTier::Medium);
    let (low_prevented, low_cost) = tier_outcome(dataset, economics, RiskTier::Low);

    let total_prevented = high_prevented + medium_prevented + low_prevented;
    let total_cost = high_cost + medium_cost + low_cost;
    let revenue_protected = total_prevented * economics.avg_loss_per_default;

    // Zero program cost defines both ratios as 0 rather than dividing.
    let (roi_percentage, per_dollar_yield) = if total_cost > 0.0 {
        (
            (revenue_protected - total_cost) / total_cost * 100.0,
            revenue_protected / total_cost,
        )
    } else {
        (0.0, 0.0)
    };

    RoiAnalysis {
        program_cost: ProgramCost {
            high_tier: high_cost,
            medium_tier: medium_cost,
            low_tier: low_cost,
            total: total_cost,
        },
        prevented_defaults: round1(total_prevented),
        revenue_protected,
        net_benefit: revenue_protected - total_cost,
        roi_percentage: round1(roi_percentage),
        per_dollar_yield: round2(per_dollar_yield),
    }
}
