//! Immutable service context shared across request handlers.
//!
//! The context is built once at startup from the loaded dataset and optional
//! probability model, then shared read-only. Availability is modeled as an
//! explicit state checked once at the handler boundary instead of per-field
//! null checks.

use std::sync::Arc;

use super::dataset::EnrichedDataset;
use super::domain::{CustomerSummaryView, RiskTier};
use super::effectiveness::{
    portfolio_summary, risk_distribution, signal_effectiveness, PortfolioSummary,
    RiskDistribution, SignalEffectiveness,
};
use super::model::{FeatureImportance, ModelError, ProbabilityEstimator};
use super::roi::{calculate_roi, RoiAnalysis};
use super::scoring::{
    CustomerScoreReport, CustomerScoreRequest, CustomerScoringService, RiskError,
};
use super::thresholds::{InterventionEconomics, SignalThresholds, TierCutoffs};

/// Hard cap on the customer listing page size.
pub const MAX_CUSTOMER_PAGE: usize = 100;
pub const DEFAULT_CUSTOMER_PAGE: usize = 20;

/// Everything the analytics endpoints need, constructed once and never
/// mutated afterwards.
pub struct RiskContext {
    dataset: EnrichedDataset,
    economics: InterventionEconomics,
    model: Option<Arc<dyn ProbabilityEstimator>>,
    scoring: CustomerScoringService,
}

impl RiskContext {
    pub fn new(
        dataset: EnrichedDataset,
        thresholds: SignalThresholds,
        cutoffs: TierCutoffs,
        economics: InterventionEconomics,
        model: Option<Arc<dyn ProbabilityEstimator>>,
    ) -> Self {
        let scoring = CustomerScoringService::new(thresholds, cutoffs, model.clone());
        Self {
            dataset,
            economics,
            model,
            scoring,
        }
    }

    pub fn dataset(&self) -> &EnrichedDataset {
        &self.dataset
    }

    pub fn portfolio_summary(&self) -> PortfolioSummary {
        portfolio_summary(&self.dataset)
    }

    pub fn signal_effectiveness(&self) -> Vec<SignalEffectiveness> {
        signal_effectiveness(&self.dataset)
    }

    pub fn risk_distribution(&self) -> RiskDistribution {
        risk_distribution(&self.dataset)
    }

    pub fn calculate_roi(&self) -> RoiAnalysis {
        calculate_roi(&self.dataset, &self.economics)
    }

    pub fn score_customer(
        &self,
        request: &CustomerScoreRequest,
    ) -> Result<CustomerScoreReport, RiskError> {
        self.scoring.score(request)
    }

    /// Customer listing, optionally filtered by tier. The effective limit is
    /// capped at [`MAX_CUSTOMER_PAGE`] regardless of what the caller asks for.
    pub fn customers(&self, tier: Option<RiskTier>, limit: usize) -> Vec<CustomerSummaryView> {
        let limit = limit.min(MAX_CUSTOMER_PAGE);
        self.dataset
            .iter()
            .filter(|customer| tier.map_or(true, |t| customer.tier == t))
            .take(limit)
            .map(|customer| customer.summary_view())
            .collect()
    }

    /// Top-n entries of the model's training-time importance ranking.
    pub fn top_features(&self, n: usize) -> Result<Vec<FeatureImportance>, ModelError> {
        let model = self.model.as_deref().ok_or(ModelError::NotReady)?;
        Ok(model.feature_importance().iter().take(n).cloned().collect())
    }
}

/// Availability of the risk analytics surface, decided once at startup.
pub enum ServiceState {
    Ready(Arc<RiskContext>),
    NotReady { reason: String },
}

impl ServiceState {
    pub fn context(&self) -> Result<&Arc<RiskContext>, &str> {
        match self {
            ServiceState::Ready(context) => Ok(context),
            ServiceState::NotReady { reason } => Err(reason),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ServiceState::Ready(_))
    }
}
