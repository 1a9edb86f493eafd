use std::sync::Arc;

use crate::risk::context::RiskContext;
use crate::risk::dataset::EnrichedDataset;
use crate::risk::domain::{CustomerId, CustomerRecord};
use crate::risk::model::{FeatureImportance, ProbabilityEstimator, FEATURE_COUNT};
use crate::risk::scoring::CustomerScoreRequest;
use crate::risk::thresholds::{InterventionEconomics, SignalThresholds, TierCutoffs};

#[allow(clippy::too_many_arguments)]
pub(super) fn record(
    id: &str,
    utilization: f64,
    payment_ratio: f64,
    min_due_freq: f64,
    merchant_mix: f64,
    cash_withdrawal: f64,
    spend_change: f64,
    dpd_bucket: u8,
) -> CustomerRecord {
    CustomerRecord {
        customer_id: CustomerId(id.to_string()),
        utilization_pct: utilization,
        payment_ratio,
        min_due_paid_freq: min_due_freq,
        merchant_mix_index: merchant_mix,
        cash_withdrawal_pct: cash_withdrawal,
        spend_change_pct: spend_change,
        credit_limit: 50_000,
        dpd_bucket_next_month: dpd_bucket,
    }
}

/// A customer with healthy behavior on every field: no signals fire.
pub(super) fn quiet_record(id: &str, dpd_bucket: u8) -> CustomerRecord {
    record(id, 30.0, 85.0, 90.0, 0.8, 2.0, 5.0, dpd_bucket)
}

/// The canonical all-signals scenario: utilization 85, cash withdrawal 20,
/// payment ratio 35, min-due frequency 10, merchant mix 0.2, spend change -15.
pub(super) fn stressed_record(id: &str, dpd_bucket: u8) -> CustomerRecord {
    record(id, 85.0, 35.0, 10.0, 0.2, 20.0, -15.0, dpd_bucket)
}

pub(super) fn dataset(records: Vec<CustomerRecord>) -> EnrichedDataset {
    EnrichedDataset::build(
        records,
        &SignalThresholds::default(),
        &TierCutoffs::default(),
    )
}

pub(super) fn context(
    records: Vec<CustomerRecord>,
    model: Option<Arc<dyn ProbabilityEstimator>>,
) -> RiskContext {
    RiskContext::new(
        dataset(records),
        SignalThresholds::default(),
        TierCutoffs::default(),
        InterventionEconomics::default(),
        model,
    )
}

pub(super) fn quiet_request(id: &str) -> CustomerScoreRequest {
    CustomerScoreRequest {
        customer_id: Some(id.to_string()),
        utilization_pct: 30.0,
        payment_ratio: 85.0,
        min_due_paid_freq: 90.0,
        merchant_mix_index: 0.8,
        cash_withdrawal_pct: 2.0,
        spend_change_pct: 5.0,
        signals: None,
    }
}

pub(super) fn stressed_request(id: &str) -> CustomerScoreRequest {
    CustomerScoreRequest {
        customer_id: Some(id.to_string()),
        utilization_pct: 85.0,
        payment_ratio: 35.0,
        min_due_paid_freq: 10.0,
        merchant_mix_index: 0.2,
        cash_withdrawal_pct: 20.0,
        spend_change_pct: -15.0,
        signals: None,
    }
}

/// Estimator returning a fixed probability so scoring tests stay exact.
pub(super) struct FixedEstimator {
    pub(super) probability: f64,
    pub(super) importance: Vec<FeatureImportance>,
}

impl FixedEstimator {
    pub(super) fn new(probability: f64) -> Self {
        Self {
            probability,
            importance: vec![
                FeatureImportance {
                    feature: "Utilisation %",
                    importance: 0.6,
                },
                FeatureImportance {
                    feature: "signal_cash_surge",
                    importance: 0.4,
                },
            ],
        }
    }
}

impl ProbabilityEstimator for FixedEstimator {
    fn predict_proba(&self, _features: &[f64; FEATURE_COUNT]) -> f64 {
        self.probability
    }

    fn feature_importance(&self) -> &[FeatureImportance] {
        &self.importance
    }
}
