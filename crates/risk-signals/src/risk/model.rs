//! Probability model adapter.
//!
//! The core depends on one opaque capability: given a fixed-order feature
//! vector, return a delinquency probability in [0,1]. Any estimator behind
//! [`ProbabilityEstimator`] satisfies it; [`LogisticModel`] is the bundled
//! implementation fit on the enriched dataset at startup.

use serde::Serialize;

use super::dataset::EnrichedDataset;
use super::domain::SignalSet;

pub const FEATURE_COUNT: usize = 11;

/// Training-time feature order: the six continuous fields followed by the
/// five signal flags as 0/1. Callers must supply vectors in exactly this
/// order; there is no runtime check.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Utilisation %",
    "Avg Payment Ratio",
    "Min Due Paid Frequency",
    "Merchant Mix Index",
    "Cash Withdrawal %",
    "Recent Spend Change %",
    "signal_spend_decline",
    "signal_high_utilization",
    "signal_payment_decline",
    "signal_cash_surge",
    "signal_low_merchant_mix",
];

/// Assemble a feature vector from continuous fields and signal flags.
pub fn feature_vector(continuous: [f64; 6], signals: &SignalSet) -> [f64; FEATURE_COUNT] {
    let mut features = [0.0; FEATURE_COUNT];
    features[..6].copy_from_slice(&continuous);
    features[6..].copy_from_slice(&signals.as_features());
    features
}

/// One entry of the model's training-time importance ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

/// Failure modes of the probability path. Absence of a model degrades the
/// probability fields only; the rule-based path never depends on it.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("probability model not available")]
    NotReady,
    #[error("not enough labeled records to fit a model")]
    InsufficientData,
}

/// A trained probability-of-delinquency estimator. Implementations must be
/// immutable after construction so concurrent scoring needs no locking.
pub trait ProbabilityEstimator: Send + Sync {
    /// Probability of delinquency for a feature vector in training order.
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64;

    /// Importance ranking computed at training time, descending.
    fn feature_importance(&self) -> &[FeatureImportance];
}

/// Logistic regression over standardized features, fit by deterministic
/// full-batch gradient descent.
pub struct LogisticModel {
    weights: [f64; FEATURE_COUNT],
    bias: f64,
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
    importance: Vec<FeatureImportance>,
}

const EPOCHS: usize = 300;
const LEARNING_RATE: f64 = 0.1;

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LogisticModel {
    /// Fit on the enriched dataset's continuous fields plus signal flags
    /// against the delinquency label.
    pub fn train(dataset: &EnrichedDataset) -> Result<Self, ModelError> {
        let rows: Vec<([f64; FEATURE_COUNT], f64)> = dataset
            .iter()
            .map(|customer| {
                let features =
                    feature_vector(customer.record.continuous_features(), &customer.signals);
                let label = if customer.is_delinquent { 1.0 } else { 0.0 };
                (features, label)
            })
            .collect();

        if rows.len() < 2 {
            return Err(ModelError::InsufficientData);
        }

        let n = rows.len() as f64;
        let mut means = [0.0; FEATURE_COUNT];
        let mut stds = [0.0; FEATURE_COUNT];
        for (features, _) in &rows {
            for (mean, value) in means.iter_mut().zip(features) {
                *mean += value / n;
            }
        }
        for (features, _) in &rows {
            for ((std, mean), value) in stds.iter_mut().zip(&means).zip(features) {
                *std += (value - mean).powi(2) / n;
            }
        }
        for std in &mut stds {
            *std = std.sqrt();
            // Constant columns standardize to zero instead of dividing by zero.
            if *std == 0.0 {
                *std = 1.0;
            }
        }

        let standardized: Vec<[f64; FEATURE_COUNT]> = rows
            .iter()
            .map(|(features, _)| {
                let mut scaled = [0.0; FEATURE_COUNT];
                for i in 0..FEATURE_COUNT {
                    scaled[i] = (features[i] - means[i]) / stds[i];
                }
                scaled
            })
            .collect();

        let mut weights = [0.0; FEATURE_COUNT];
        let mut bias = 0.0;
        for _ in 0..EPOCHS {
            let mut weight_grad = [0.0; FEATURE_COUNT];
            let mut bias_grad = 0.0;
            for (scaled, (_, label)) in standardized.iter().zip(&rows) {
                let z = bias
                    + weights
                        .iter()
                        .zip(scaled)
                        .map(|(weight, value)| weight * value)
                        .sum::<f64>();
                let residual = sigmoid(z) - label;
                for (grad, value) in weight_grad.iter_mut().zip(scaled) {
                    *grad += residual * value / n;
                }
                bias_grad += residual / n;
            }
            for (weight, grad) in weights.iter_mut().zip(&weight_grad) {
                *weight -= LEARNING_RATE * grad;
            }
            bias -= LEARNING_RATE * bias_grad;
        }

        let magnitude: f64 = weights.iter().map(|weight| weight.abs()).sum();
        let mut importance: Vec<FeatureImportance> = FEATURE_NAMES
            .iter()
            .zip(&weights)
            .map(|(feature, weight)| FeatureImportance {
                feature: *feature,
                importance: if magnitude > 0.0 {
                    weight.abs() / magnitude
                } else {
                    0.0
                },
            })
            .collect();
        importance.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Self {
            weights,
            bias,
            means,
            stds,
            importance,
        })
    }
}

impl ProbabilityEstimator for LogisticModel {
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let z = self.bias
            + self
                .weights
                .iter()
                .zip(features)
                .zip(self.means.iter().zip(&self.stds))
                .map(|((weight, value), (mean, std))| weight * (value - mean) / std)
                .sum::<f64>();
        sigmoid(z).clamp(0.0, 1.0)
    }

    fn feature_importance(&self) -> &[FeatureImportance] {
        &self.importance
    }
}
