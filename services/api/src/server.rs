use crate::cli::ServeArgs;
use crate::infra::{build_registry, AppState};
use crate::routes::with_service_routes;
use admision::config::AppConfig;
use admision::reports::{FilterCascade, ReportService};
use admision::verification::VerificationService;
use admision::{telemetry, AppError};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let registry = Arc::new(build_registry(&config.registry)?);
    let verification = Arc::new(VerificationService::new(registry.clone()));
    let cascade = Arc::new(FilterCascade::new(registry.clone()));
    let reports = Arc::new(
        ReportService::new(registry).with_letterhead(config.registry.letterhead.clone()),
    );

    let app = with_service_routes(verification, cascade, reports)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission clearance service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
