use crate::cli::ServeArgs;
use crate::infra::{authoritative_service, build_engine, AppState};
use crate::routes::with_summary_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gradu::config::AppConfig;
use gradu::error::AppError;
use gradu::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = build_engine(&config.policy)?;
    let policy_version = engine.policy_version().to_string();
    let service = authoritative_service(engine);

    let app = with_summary_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, policy = %policy_version, "graduation summary service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
