use crate::cli::ServeArgs;
use crate::infra::{build_service_state, AppState};
use crate::routes::with_risk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use risk_signals::config::AppConfig;
use risk_signals::error::AppError;
use risk_signals::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_csv) = args.data_csv.take() {
        config.data.csv_path = data_csv;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service_state = Arc::new(build_service_state(&config.data.csv_path));

    let app = with_risk_routes(service_state.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(service_state.is_ready(), Ordering::Release);

    info!(?config.environment, %addr, ready = service_state.is_ready(), "risk signals service listening");

    axum::serve(listener, app).await?;
    Ok(())
}
