use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryClinicalStore};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hearing_care::config::AppConfig;
use hearing_care::error::AppError;
use hearing_care::telemetry;
use hearing_care::workflows::patient::PatientCareService;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let records = Arc::new(InMemoryClinicalStore::default());
    let care_service = Arc::new(PatientCareService::new(records));

    let app = with_operational_routes(care_service, config.identity.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        patient_header = %config.identity.patient_header(),
        "hearing care service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
