use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use risk_signals::risk::{
    load_from_path, EnrichedDataset, InterventionEconomics, LogisticModel, ProbabilityEstimator,
    RiskContext, ServiceState, SignalThresholds, TierCutoffs,
};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the dataset and fit the bundled estimator, deciding availability
/// once. A missing or unreadable dataset leaves the service up but in the
/// NotReady state; a failed model fit only degrades the probability path.
pub(crate) fn build_service_state(csv_path: &Path) -> ServiceState {
    let records = match load_from_path(csv_path) {
        Ok(records) => records,
        Err(err) => {
            warn!(%err, path = %csv_path.display(), "dataset unavailable; serving degraded");
            return ServiceState::NotReady {
                reason: err.to_string(),
            };
        }
    };

    let thresholds = SignalThresholds::default();
    let cutoffs = TierCutoffs::default();
    let dataset = EnrichedDataset::build(records, &thresholds, &cutoffs);
    info!(customers = dataset.len(), "portfolio enriched");

    let model: Option<Arc<dyn ProbabilityEstimator>> = match LogisticModel::train(&dataset) {
        Ok(model) => Some(Arc::new(model)),
        Err(err) => {
            warn!(%err, "probability model unavailable; rule-based scoring only");
            None
        }
    };

    ServiceState::Ready(Arc::new(RiskContext::new(
        dataset,
        thresholds,
        cutoffs,
        InterventionEconomics::default(),
        model,
    )))
}
