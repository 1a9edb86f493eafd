//! Population-level signal analytics: prevalence, lift, and portfolio
//! distribution over the enriched dataset.

use serde::Serialize;

use super::dataset::EnrichedDataset;
use super::domain::{RiskTier, SignalKind};
use super::{round1, round2};

/// Effectiveness metrics for one behavioral signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalEffectiveness {
    pub name: &'static str,
    pub code: &'static str,
    pub prevalence: usize,
    pub prevalence_pct: f64,
    pub delinquency_rate_when_present: f64,
    pub delinquency_rate_when_absent: f64,
    pub risk_lift: f64,
}

/// Portfolio-level delinquency summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_customers: usize,
    pub total_delinquent: usize,
    pub delinquency_rate: f64,
    pub tier_breakdown: TierBreakdown,
    pub tier_health: Vec<TierHealth>,
}

/// Count of customers per tier; the three counts always sum to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TierBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierHealth {
    pub tier: RiskTier,
    pub count: usize,
    pub delinquency_rate: f64,
}

/// Full distribution of scores and tiers across the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDistribution {
    pub risk_score_distribution: Vec<ScoreBucket>,
    pub tier_distribution: Vec<TierDistribution>,
}

/// One bucket of the composite-score histogram. All six buckets 0 through 5
/// are always present, with zero counts made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBucket {
    pub score: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierDistribution {
    pub tier: RiskTier,
    pub count: usize,
    pub percentage: f64,
    pub delinquency_rate: f64,
    pub avg_utilization: f64,
    pub avg_payment_ratio: f64,
    pub avg_min_due_paid_freq: f64,
    pub avg_merchant_mix: f64,
    pub avg_cash_withdrawal: f64,
    pub avg_spend_change: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn delinquency_pct<'a>(members: impl Iterator<Item = &'a super::domain::EnrichedCustomer>) -> f64 {
    mean(members.map(|customer| if customer.is_delinquent { 100.0 } else { 0.0 }))
}

/// Measure each signal's association with delinquency, sorted descending by
/// lift. Lift is guarded at both ends of the ratio: a zero absent-side rate
/// and a zero-prevalence signal both yield the neutral lift of 1.
pub fn signal_effectiveness(dataset: &EnrichedDataset) -> Vec<SignalEffectiveness> {
    let total = dataset.len();

    let mut signals: Vec<SignalEffectiveness> = SignalKind::ALL
        .iter()
        .map(|kind| {
            let prevalence = dataset
                .iter()
                .filter(|customer| customer.signals.get(*kind))
                .count();

            let rate_present =
                delinquency_pct(dataset.iter().filter(|customer| customer.signals.get(*kind)));
            let rate_absent =
                delinquency_pct(dataset.iter().filter(|customer| !customer.signals.get(*kind)));

            let risk_lift = if prevalence == 0 || rate_absent == 0.0 {
                1.0
            } else {
                rate_present / rate_absent
            };

            let prevalence_pct = if total == 0 {
                0.0
            } else {
                prevalence as f64 / total as f64 * 100.0
            };

            SignalEffectiveness {
                name: kind.label(),
                code: kind.code(),
                prevalence,
                prevalence_pct: round1(prevalence_pct),
                delinquency_rate_when_present: round1(rate_present),
                delinquency_rate_when_absent: round1(rate_absent),
                risk_lift: round2(risk_lift),
            }
        })
        .collect();

    signals.sort_by(|a, b| {
        b.risk_lift
            .partial_cmp(&a.risk_lift)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    signals
}

pub fn portfolio_summary(dataset: &EnrichedDataset) -> PortfolioSummary {
    let total_customers = dataset.len();
    let total_delinquent = dataset.iter().filter(|c| c.is_delinquent).count();
    let delinquency_rate = if total_customers == 0 {
        0.0
    } else {
        total_delinquent as f64 / total_customers as f64 * 100.0
    };

    let count_for = |tier| dataset.tier_members(tier).count();
    let tier_breakdown = TierBreakdown {
        high: count_for(RiskTier::High),
        medium: count_for(RiskTier::Medium),
        low: count_for(RiskTier::Low),
    };

    let tier_health = RiskTier::ALL
        .iter()
        .map(|tier| TierHealth {
            tier: *tier,
            count: dataset.tier_members(*tier).count(),
            delinquency_rate: round1(delinquency_pct(dataset.tier_members(*tier))),
        })
        .collect();

    PortfolioSummary {
        total_customers,
        total_delinquent,
        delinquency_rate: round2(delinquency_rate),
        tier_breakdown,
        tier_health,
    }
}

pub fn risk_distribution(dataset: &EnrichedDataset) -> RiskDistribution {
    let total = dataset.len();

    let risk_score_distribution = (0u8..=5)
        .map(|score| ScoreBucket {
            score,
            count: dataset.iter().filter(|c| c.risk_score == score).count(),
        })
        .collect();

    let tier_distribution = RiskTier::ALL
        .iter()
        .map(|tier| {
            let count = dataset.tier_members(*tier).count();
            let percentage = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };

            TierDistribution {
                tier: *tier,
                count,
                percentage: round1(percentage),
                delinquency_rate: round1(delinquency_pct(dataset.tier_members(*tier))),
                avg_utilization: round1(mean(
                    dataset.tier_members(*tier).map(|c| c.record.utilization_pct),
                )),
                avg_payment_ratio: round1(mean(
                    dataset.tier_members(*tier).map(|c| c.record.payment_ratio),
                )),
                avg_min_due_paid_freq: round1(mean(
                    dataset.tier_members(*tier).map(|c| c.record.min_due_paid_freq),
                )),
                avg_merchant_mix: round2(mean(
                    dataset
                        .tier_members(*tier)
                        .map(|c| c.record.merchant_mix_index),
                )),
                avg_cash_withdrawal: round1(mean(
                    dataset
                        .tier_members(*tier)
                        .map(|c| c.record.cash_withdrawal_pct),
                )),
                avg_spend_change: round1(mean(
                    dataset.tier_members(*tier).map(|c| c.record.spend_change_pct),
                )),
            }
        })
        .collect();

    RiskDistribution {
        risk_score_distribution,
        tier_distribution,
    }
}
