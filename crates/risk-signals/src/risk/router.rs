use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::context::{ServiceState, DEFAULT_CUSTOMER_PAGE};
use super::domain::RiskTier;
use super::model::ModelError;
use super::scoring::CustomerScoreRequest;

/// Router builder exposing the risk analytics endpoints.
pub fn risk_router(state: Arc<ServiceState>) -> Router {
    Router::new()
        .route("/api/v1/portfolio-summary", get(portfolio_summary_handler))
        .route("/api/v1/signals", get(signals_handler))
        .route("/api/v1/risk-distribution", get(risk_distribution_handler))
        .route("/api/v1/score-customer", post(score_customer_handler))
        .route("/api/v1/customers", get(customers_handler))
        .route("/api/v1/intervention-roi", get(intervention_roi_handler))
        .route(
            "/api/v1/feature-importance",
            get(feature_importance_handler),
        )
        .route("/api/v1/dashboard-stats", get(dashboard_stats_handler))
        .with_state(state)
}

fn service_unavailable(reason: &str) -> Response {
    let payload = json!({ "error": format!("risk service not available: {reason}") });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}

fn bad_request(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn portfolio_summary_handler(State(state): State<Arc<ServiceState>>) -> Response {
    match state.context() {
        Ok(context) => Json(context.portfolio_summary()).into_response(),
        Err(reason) => service_unavailable(reason),
    }
}

pub(crate) async fn signals_handler(State(state): State<Arc<ServiceState>>) -> Response {
    match state.context() {
        Ok(context) => Json(context.signal_effectiveness()).into_response(),
        Err(reason) => service_unavailable(reason),
    }
}

pub(crate) async fn risk_distribution_handler(State(state): State<Arc<ServiceState>>) -> Response {
    match state.context() {
        Ok(context) => Json(context.risk_distribution()).into_response(),
        Err(reason) => service_unavailable(reason),
    }
}

pub(crate) async fn intervention_roi_handler(State(state): State<Arc<ServiceState>>) -> Response {
    match state.context() {
        Ok(context) => Json(context.calculate_roi()).into_response(),
        Err(reason) => service_unavailable(reason),
    }
}

pub(crate) async fn score_customer_handler(
    State(state): State<Arc<ServiceState>>,
    payload: Result<Json<CustomerScoreRequest>, JsonRejection>,
) -> Response {
    let context = match state.context() {
        Ok(context) => context,
        Err(reason) => return service_unavailable(reason),
    };

    // A payload that fails typed deserialization is invalid customer data,
    // not a transport error.
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return bad_request(format!("invalid customer data: {}", rejection.body_text()))
        }
    };

    match context.score_customer(&request) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => bad_request(error.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomersQuery {
    #[serde(default)]
    tier: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

pub(crate) async fn customers_handler(
    State(state): State<Arc<ServiceState>>,
    Query(query): Query<CustomersQuery>,
) -> Response {
    let context = match state.context() {
        Ok(context) => context,
        Err(reason) => return service_unavailable(reason),
    };

    let tier = match query.tier.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<RiskTier>() {
            Ok(tier) => Some(tier),
            Err(error) => return bad_request(error.to_string()),
        },
    };

    let limit = query.limit.unwrap_or(DEFAULT_CUSTOMER_PAGE);
    Json(context.customers(tier, limit)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureImportanceQuery {
    #[serde(default)]
    top: Option<usize>,
}

pub(crate) async fn feature_importance_handler(
    State(state): State<Arc<ServiceState>>,
    Query(query): Query<FeatureImportanceQuery>,
) -> Response {
    let context = match state.context() {
        Ok(context) => context,
        Err(reason) => return service_unavailable(reason),
    };

    match context.top_features(query.top.unwrap_or(10)) {
        Ok(features) => Json(json!({ "top_features": features })).into_response(),
        Err(error @ ModelError::NotReady) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn dashboard_stats_handler(State(state): State<Arc<ServiceState>>) -> Response {
    let context = match state.context() {
        Ok(context) => context,
        Err(reason) => return service_unavailable(reason),
    };

    let top_signals: Vec<_> = context.signal_effectiveness().into_iter().take(3).collect();
    Json(json!({
        "portfolio": context.portfolio_summary(),
        "roi": context.calculate_roi(),
        "top_signals": top_signals,
    }))
    .into_response()
}
