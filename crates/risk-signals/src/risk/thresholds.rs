use serde::{Deserialize, Serialize};

use super::domain::RiskTier;

/// Fixed thresholds backing the five behavioral signal formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    pub spend_decline_pct: f64,
    pub utilization_high_pct: f64,
    pub utilization_medium_pct: f64,
    pub cash_withdrawal_pct: f64,
    pub payment_ratio_high: f64,
    pub payment_ratio_medium: f64,
    pub min_due_paid_freq: f64,
    pub merchant_mix_index: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            spend_decline_pct: -10.0,
            utilization_high_pct: 80.0,
            utilization_medium_pct: 70.0,
            cash_withdrawal_pct: 15.0,
            payment_ratio_high: 40.0,
            payment_ratio_medium: 60.0,
            min_due_paid_freq: 30.0,
            merchant_mix_index: 0.4,
        }
    }
}

/// Cut points mapping a composite score onto a risk tier. Boundaries are
/// non-strict: a score equal to a cut point lands in that tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCutoffs {
    pub high: u8,
    pub medium: u8,
}

impl Default for TierCutoffs {
    fn default() -> Self {
        Self { high: 3, medium: 2 }
    }
}

impl TierCutoffs {
    pub fn classify(&self, score: u8) -> RiskTier {
        if score >= self.high {
            RiskTier::High
        } else if score >= self.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// Per-tier intervention economics used by the ROI simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionEconomics {
    pub high_unit_cost: f64,
    pub medium_unit_cost: f64,
    pub low_unit_cost: f64,
    pub high_prevention_rate: f64,
    pub medium_prevention_rate: f64,
    pub low_prevention_rate: f64,
    pub avg_loss_per_default: f64,
}

impl Default for InterventionEconomics {
    fn default() -> Self {
        Self {
            high_unit_cost: 20.0,
            medium_unit_cost: 7.50,
            low_unit_cost: 0.50,
            high_prevention_rate: 0.40,
            medium_prevention_rate: 0.25,
            low_prevention_rate: 0.07,
            avg_loss_per_default: 5000.0,
        }
    }
}

impl InterventionEconomics {
    pub fn unit_cost(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::High => self.high_unit_cost,
            RiskTier::Medium => self.medium_unit_cost,
            RiskTier::Low => self.low_unit_cost,
        }
    }

    pub fn prevention_rate(&self, tier: RiskTier) -> f64 {
        match tier {
            RiskTier::High => self.high_prevention_rate,
            RiskTier::Medium => self.medium_prevention_rate,
            RiskTier::Low => self.low_prevention_rate,
        }
    }
}
