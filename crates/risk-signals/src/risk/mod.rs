//! Risk scoring and analytics engine.
//!
//! Signal engineering, tier classification, signal-effectiveness analytics,
//! intervention ROI simulation, and single-customer scoring, composed behind
//! an immutable [`context::RiskContext`] and exposed through
//! [`router::risk_router`].

pub mod context;
pub mod dataset;
pub mod domain;
pub mod effectiveness;
pub mod model;
pub mod roi;
pub mod router;
pub mod scoring;
pub mod signals;
pub mod thresholds;

#[cfg(test)]
mod tests;

pub use context::{RiskContext, ServiceState, DEFAULT_CUSTOMER_PAGE, MAX_CUSTOMER_PAGE};
pub use dataset::{load_from_path, load_records, DatasetError, EnrichedDataset};
pub use domain::{
    CustomerId, CustomerRecord, CustomerSummaryView, EnrichedCustomer, RiskTier, SignalKind,
    SignalSet, UnknownTier,
};
pub use effectiveness::{
    portfolio_summary, risk_distribution, signal_effectiveness, PortfolioSummary,
    RiskDistribution, SignalEffectiveness,
};
pub use model::{
    feature_vector, FeatureImportance, LogisticModel, ModelError, ProbabilityEstimator,
    FEATURE_COUNT, FEATURE_NAMES,
};
pub use roi::{calculate_roi, RoiAnalysis};
pub use router::risk_router;
pub use scoring::{
    recommendations, CustomerScoreReport, CustomerScoreRequest, CustomerScoringService, RiskError,
};
pub use signals::SignalEngine;
pub use thresholds::{InterventionEconomics, SignalThresholds, TierCutoffs};

/// Round to one decimal place, matching the precision of reported rates.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
