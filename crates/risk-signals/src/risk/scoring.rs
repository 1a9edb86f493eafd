//! Single-customer scoring: rule-based signals and tier merged with the
//! probability model's estimate and a static recommendation table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{RiskTier, SignalSet};
use super::model::{feature_vector, ProbabilityEstimator};
use super::round3;
use super::signals::SignalEngine;
use super::thresholds::{SignalThresholds, TierCutoffs};

/// Error raised while scoring a caller-supplied customer payload. Local to
/// the request; never touches the shared dataset or model.
#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("invalid customer data: {reason}")]
    InvalidCustomerData { reason: String },
}

/// Raw fields for one customer submitted at request time. The six continuous
/// fields are required; deserialization failure is the typed
/// `InvalidCustomerData` boundary. Signal flags may be supplied to override
/// derivation, and are trusted verbatim when present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerScoreRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(alias = "Utilisation %")]
    pub utilization_pct: f64,
    #[serde(alias = "Avg Payment Ratio")]
    pub payment_ratio: f64,
    #[serde(alias = "Min Due Paid Frequency")]
    pub min_due_paid_freq: f64,
    #[serde(alias = "Merchant Mix Index")]
    pub merchant_mix_index: f64,
    #[serde(alias = "Cash Withdrawal %")]
    pub cash_withdrawal_pct: f64,
    #[serde(alias = "Recent Spend Change %")]
    pub spend_change_pct: f64,
    #[serde(default)]
    pub signals: Option<SignalSet>,
}

impl CustomerScoreRequest {
    fn continuous_features(&self) -> [f64; 6] {
        [
            self.utilization_pct,
            self.payment_ratio,
            self.min_due_paid_freq,
            self.merchant_mix_index,
            self.cash_withdrawal_pct,
            self.spend_change_pct,
        ]
    }

    fn validate(&self) -> Result<(), RiskError> {
        let fields = [
            ("utilization_pct", self.utilization_pct),
            ("payment_ratio", self.payment_ratio),
            ("min_due_paid_freq", self.min_due_paid_freq),
            ("merchant_mix_index", self.merchant_mix_index),
            ("cash_withdrawal_pct", self.cash_withdrawal_pct),
            ("spend_change_pct", self.spend_change_pct),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(RiskError::InvalidCustomerData {
                    reason: format!("'{name}' must be a finite number"),
                });
            }
        }
        Ok(())
    }
}

/// Scoring response. `delinquency_probability` and `confidence` are null
/// when no probability model is available; the rule-based fields are always
/// populated for valid input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerScoreReport {
    pub customer_id: String,
    pub risk_score: u8,
    pub risk_tier: RiskTier,
    pub delinquency_probability: Option<f64>,
    pub confidence: Option<f64>,
    pub triggered_signals: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
}

/// Fixed intervention playbook per tier.
pub fn recommendations(tier: RiskTier) -> Vec<&'static str> {
    match tier {
        RiskTier::High => vec![
            "Direct phone outreach within 24-48 hours",
            "Offer payment plan or credit limit review",
            "Connect with financial counselor",
            "Monitor weekly for 3 months",
        ],
        RiskTier::Medium => vec![
            "Automated email with account health summary",
            "Offer payment flexibility or rate reduction",
            "Push financial wellness resources",
            "Monitor monthly for 2 months",
        ],
        RiskTier::Low => vec![
            "Educational email campaign",
            "Highlight available resources",
            "Quarterly monitoring",
            "Standard customer service",
        ],
    }
}

/// Service composing the signal engine, tier rule, and probability model for
/// ad-hoc scoring requests. Stateless apart from shared read-only config.
pub struct CustomerScoringService {
    thresholds: SignalThresholds,
    cutoffs: TierCutoffs,
    model: Option<Arc<dyn ProbabilityEstimator>>,
}

impl CustomerScoringService {
    pub fn new(
        thresholds: SignalThresholds,
        cutoffs: TierCutoffs,
        model: Option<Arc<dyn ProbabilityEstimator>>,
    ) -> Self {
        Self {
            thresholds,
            cutoffs,
            model,
        }
    }

    pub fn score(&self, request: &CustomerScoreRequest) -> Result<CustomerScoreReport, RiskError> {
        request.validate()?;

        let signals = match request.signals {
            Some(supplied) => supplied,
            None => {
                let record = super::domain::CustomerRecord {
                    customer_id: super::domain::CustomerId(String::new()),
                    utilization_pct: request.utilization_pct,
                    payment_ratio: request.payment_ratio,
                    min_due_paid_freq: request.min_due_paid_freq,
                    merchant_mix_index: request.merchant_mix_index,
                    cash_withdrawal_pct: request.cash_withdrawal_pct,
                    spend_change_pct: request.spend_change_pct,
                    credit_limit: 0,
                    dpd_bucket_next_month: 0,
                };
                SignalEngine::evaluate(&record, &self.thresholds)
            }
        };

        let risk_score = signals.active_count();
        let risk_tier = self.cutoffs.classify(risk_score);

        // Model absence degrades only the probability fields.
        let probability = self.model.as_deref().map(|model| {
            let features = feature_vector(request.continuous_features(), &signals);
            model.predict_proba(&features)
        });
        let confidence = probability.map(|p| round3((p - 0.5).abs() * 2.0));

        Ok(CustomerScoreReport {
            customer_id: request
                .customer_id
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            risk_score,
            risk_tier,
            delinquency_probability: probability.map(round3),
            confidence,
            triggered_signals: signals.triggered_labels(),
            recommendations: recommendations(risk_tier),
        })
    }
}
